use sqlx::PgPool;
use tracing::{error, instrument};

use bangbang_core::AppError;

use crate::modules::products::model::{
    CreateProductDto, PRODUCT_SELECT, Product, ProductFilterParams, UpdateProductDto,
};

fn product_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Product not found"))
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e
        && db_err.is_foreign_key_violation()
    {
        return AppError::bad_request(anyhow::anyhow!("Category does not exist"));
    }
    error!(error = %e, "Failed to write product");
    AppError::database(e)
}

pub struct ProductService;

impl ProductService {
    /// Featured first, then newest.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "products"))]
    pub async fn list_products(
        db: &PgPool,
        filters: &ProductFilterParams,
    ) -> Result<Vec<Product>, AppError> {
        let mut query = String::from(PRODUCT_SELECT);
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<&str> = Vec::new();

        if let Some(category) = filters.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(category);
            conditions.push(format!("c.slug = ${}", params.len()));
        }
        if filters.featured == Some(true) {
            conditions.push("p.featured = TRUE".to_string());
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY p.featured DESC, p.created_at DESC");

        let mut sql = sqlx::query_as::<_, Product>(&query);
        for param in params {
            sql = sql.bind(param);
        }

        sql.fetch_all(db).await.map_err(|e| {
            error!(error = %e, "Failed to list products");
            AppError::database(e)
        })
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "products"))]
    pub async fn get_product(db: &PgPool, id: i64) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(&format!("{} WHERE p.id = $1", PRODUCT_SELECT))
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(product_not_found)
    }

    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "products"))]
    pub async fn create_product(db: &PgPool, dto: &CreateProductDto) -> Result<Product, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO products
                   (name, name_th, description, price, image, category_id, in_stock, featured)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING id"#,
        )
        .bind(&dto.name)
        .bind(&dto.name_th)
        .bind(dto.description.as_deref().unwrap_or(""))
        .bind(dto.price)
        .bind(&dto.image)
        .bind(dto.category_id)
        .bind(dto.in_stock.unwrap_or(true))
        .bind(dto.featured.unwrap_or(false))
        .fetch_one(db)
        .await
        .map_err(map_write_error)?;

        Self::get_product(db, id).await
    }

    #[instrument(skip(db, dto), fields(db.operation = "UPDATE", db.table = "products"))]
    pub async fn update_product(
        db: &PgPool,
        id: i64,
        dto: &UpdateProductDto,
    ) -> Result<Product, AppError> {
        let existing = Self::get_product(db, id).await?;

        let name = dto.name.clone().unwrap_or(existing.name);
        let name_th = dto.name_th.clone().unwrap_or(existing.name_th);
        let description = dto.description.clone().unwrap_or(existing.description);
        let price = dto.price.unwrap_or(existing.price);
        let image = dto.image.clone().or(existing.image);
        let category_id = dto.category_id.or(existing.category_id);
        let in_stock = dto.in_stock.unwrap_or(existing.in_stock);
        let featured = dto.featured.unwrap_or(existing.featured);

        let result = sqlx::query(
            r#"UPDATE products
               SET name = $1, name_th = $2, description = $3, price = $4, image = $5,
                   category_id = $6, in_stock = $7, featured = $8, updated_at = NOW()
               WHERE id = $9"#,
        )
        .bind(&name)
        .bind(&name_th)
        .bind(&description)
        .bind(price)
        .bind(&image)
        .bind(category_id)
        .bind(in_stock)
        .bind(featured)
        .bind(id)
        .execute(db)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(product_not_found());
        }

        Self::get_product(db, id).await
    }

    /// Deletes the product and returns its name.
    #[instrument(skip(db), fields(db.operation = "DELETE", db.table = "products"))]
    pub async fn delete_product(db: &PgPool, id: i64) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("DELETE FROM products WHERE id = $1 RETURNING name")
            .bind(id)
            .fetch_optional(db)
            .await
            .map_err(|e| {
                error!(error = %e, product.id = id, "Failed to delete product");
                AppError::database(e)
            })?
            .ok_or_else(product_not_found)
    }
}
