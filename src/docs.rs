use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use bangbang_auth::{Identity, Role};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthResponse, LoginRequest, MessageResponse, RegisterRequestDto};
use crate::modules::categories::model::{CategoriesResponse, Category};
use crate::modules::logs::model::{AuditLogEntry, LogsResponse};
use crate::modules::orders::model::{
    CreateOrderDto, Order, OrderItem, OrderItemInput, OrderResponse, OrderStatus, OrderWithItems,
    OrdersResponse, UpdateOrderStatusDto,
};
use crate::modules::products::model::{
    CreateProductDto, Product, ProductResponse, ProductsResponse, UpdateProductDto,
};
use crate::modules::settings::model::{SettingsResponse, UpdateSettingsDto};
use crate::modules::upload::model::{UploadForm, UploadResponse};
use crate::modules::users::model::{
    CreateUserDto, UpdateUserDto, User, UserResponse, UsersResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_me,
        crate::modules::categories::controller::get_categories,
        crate::modules::products::controller::get_products,
        crate::modules::products::controller::get_product,
        crate::modules::products::controller::create_product,
        crate::modules::products::controller::update_product,
        crate::modules::products::controller::delete_product,
        crate::modules::orders::controller::get_orders,
        crate::modules::orders::controller::create_order,
        crate::modules::orders::controller::get_order,
        crate::modules::orders::controller::update_order_status,
        crate::modules::settings::controller::get_settings,
        crate::modules::settings::controller::update_settings,
        crate::modules::upload::controller::upload_file,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::logs::controller::get_logs,
    ),
    components(
        schemas(
            Role,
            Identity,
            ErrorResponse,
            MessageResponse,
            LoginRequest,
            RegisterRequestDto,
            AuthResponse,
            User,
            UserResponse,
            UsersResponse,
            CreateUserDto,
            UpdateUserDto,
            Category,
            CategoriesResponse,
            Product,
            ProductResponse,
            ProductsResponse,
            CreateProductDto,
            UpdateProductDto,
            OrderStatus,
            Order,
            OrderItem,
            OrderWithItems,
            OrderItemInput,
            CreateOrderDto,
            UpdateOrderStatusDto,
            OrderResponse,
            OrdersResponse,
            SettingsResponse,
            UpdateSettingsDto,
            UploadForm,
            UploadResponse,
            AuditLogEntry,
            LogsResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Customer sign-up, login and current account"),
        (name = "Catalog", description = "Categories and products"),
        (name = "Orders", description = "Checkout, order tracking and fulfilment"),
        (name = "Settings", description = "Shop settings"),
        (name = "Upload", description = "Payment slip and product image uploads"),
        (name = "Admin Users", description = "Back-office account management"),
        (name = "Admin Logs", description = "Back-office activity log")
    ),
    info(
        title = "BangBang Bakery API",
        version = "0.1.0",
        description = "Bakery storefront and back-office REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/me",
            "/api/categories",
            "/api/products",
            "/api/products/{id}",
            "/api/orders",
            "/api/orders/{id}",
            "/api/settings",
            "/api/upload",
            "/api/admin/users",
            "/api/admin/users/{id}",
            "/api/admin/logs",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
