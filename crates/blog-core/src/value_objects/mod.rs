//! Value objects - immutable types that represent domain concepts

mod ids;
mod mobile;
mod page;

pub use ids::{ArticleId, CategoryId, CommentId, IdParseError, UserId};
pub use mobile::{validate_password_format, Mobile};
pub use page::{Page, PageRequest, MAX_PAGE_SIZE};
