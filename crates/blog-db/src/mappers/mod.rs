//! Entity to model mappers
//!
//! Conversions between domain entities (blog-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Update` structs: Borrow entity data for binding

mod article;
mod category;
mod comment;
mod user;

pub use article::ArticleInsert;
pub use user::UserUpdate;
