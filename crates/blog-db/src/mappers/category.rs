//! Category entity <-> model mapper

use blog_core::entities::ArticleCategory;
use blog_core::value_objects::CategoryId;

use crate::models::CategoryModel;

impl From<CategoryModel> for ArticleCategory {
    fn from(model: CategoryModel) -> Self {
        ArticleCategory {
            id: CategoryId::new(model.id),
            title: model.title,
            created_at: model.created_at,
        }
    }
}
