//! Database models - SQLx-compatible structs for PostgreSQL tables

mod article;
mod category;
mod comment;
mod user;

pub use article::ArticleModel;
pub use category::CategoryModel;
pub use comment::{CommentModel, CommentWithAuthorModel};
pub use user::UserModel;
