//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ArticleRepository, CategoryRepository, CommentRepository, RepoResult, UserRepository,
};
