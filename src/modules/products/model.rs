use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Product row joined with its category.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub name_th: String,
    pub description: String,
    #[schema(value_type = String, example = "45.00")]
    pub price: Decimal,
    pub image: Option<String>,
    pub category_id: Option<i64>,
    pub in_stock: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_name: Option<String>,
    pub category_name_th: Option<String>,
    pub category_slug: Option<String>,
}

pub(crate) const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.name_th, p.description, p.price, p.image, p.category_id,
           p.in_stock, p.featured, p.created_at, p.updated_at,
           c.name AS category_name, c.name_th AS category_name_th, c.slug AS category_slug
    FROM products p
    LEFT JOIN categories c ON p.category_id = c.id
"#;

pub(crate) fn validate_positive_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_positive() && !price.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive_price").with_message("Price must be positive".into()))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Thai name is required"))]
    pub name_th: String,
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive_price"))]
    #[schema(value_type = String, example = "45.00")]
    pub price: Decimal,
    #[validate(length(max = 500))]
    pub image: Option<String>,
    pub category_id: Option<i64>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

/// Partial update. Absent fields keep their current value; nullable columns
/// cannot be cleared through this DTO.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProductDto {
    #[validate(length(min = 1, max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_th: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(custom(function = "validate_positive_price"))]
    #[schema(value_type = Option<String>)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl UpdateProductDto {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.name_th.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.category_id.is_none()
            && self.in_stock.is_none()
            && self.featured.is_none()
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilterParams {
    /// Category slug
    pub category: Option<String>,
    /// Only featured products when `true`
    pub featured: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create_dto(price: &str) -> CreateProductDto {
        CreateProductDto {
            name: "Butter Croissant".to_string(),
            name_th: "ครัวซองต์เนยสด".to_string(),
            description: None,
            price: Decimal::from_str(price).unwrap(),
            image: None,
            category_id: Some(1),
            in_stock: None,
            featured: None,
        }
    }

    #[test]
    fn test_create_product_requires_positive_price() {
        assert!(create_dto("65.00").validate().is_ok());
        assert!(create_dto("0").validate().is_err());
        assert!(create_dto("-1.50").validate().is_err());
    }

    #[test]
    fn test_price_accepts_number_or_string() {
        let from_number: CreateProductDto =
            serde_json::from_str(r#"{"name":"A","name_th":"ก","price":45.5}"#).unwrap();
        let from_string: CreateProductDto =
            serde_json::from_str(r#"{"name":"A","name_th":"ก","price":"45.50"}"#).unwrap();
        assert_eq!(from_number.price, from_string.price);
    }

    #[test]
    fn test_update_product_is_empty() {
        assert!(UpdateProductDto::default().is_empty());
        let dto: UpdateProductDto = serde_json::from_str(r#"{"in_stock":false}"#).unwrap();
        assert!(!dto.is_empty());
    }

    #[test]
    fn test_update_product_rejects_non_positive_price() {
        let dto: UpdateProductDto = serde_json::from_str(r#"{"price":"0"}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_details_only_echo_sent_fields() {
        let dto: UpdateProductDto = serde_json::from_str(r#"{"featured":true}"#).unwrap();
        assert_eq!(serde_json::to_value(&dto).unwrap(), serde_json::json!({"featured": true}));
    }
}
