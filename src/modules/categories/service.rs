use sqlx::PgPool;
use tracing::instrument;

use bangbang_core::AppError;

use crate::modules::categories::model::Category;

pub struct CategoryService;

impl CategoryService {
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "categories"))]
    pub async fn list_categories(db: &PgPool) -> Result<Vec<Category>, AppError> {
        sqlx::query_as::<_, Category>("SELECT id, name, name_th, slug FROM categories ORDER BY id")
            .fetch_all(db)
            .await
            .map_err(AppError::database)
    }
}
