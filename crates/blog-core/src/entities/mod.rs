//! Domain entities - core business objects

mod article;
mod category;
mod comment;
mod user;

pub use article::{Article, NewArticle, MAX_SUMMARY_LEN, MAX_TAGS_LEN, MAX_TITLE_LEN};
pub use category::ArticleCategory;
pub use comment::{Comment, CommentWithAuthor, NewComment};
pub use user::{NewUser, User, MAX_USERNAME_LEN, MAX_USER_DESC_LEN};
