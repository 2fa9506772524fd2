use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::modules::auth::init_auth_router;
use crate::modules::categories::init_categories_router;
use crate::modules::logs::init_logs_router;
use crate::modules::orders::init_orders_router;
use crate::modules::products::init_products_router;
use crate::modules::settings::init_settings_router;
use crate::modules::upload::init_upload_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn init_router(state: AppState) -> Router {
    let upload_dir = state.storage_config.upload_dir.clone();
    let public_base_url = state.storage_config.public_base_url.clone();

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/categories", init_categories_router())
                .nest("/products", init_products_router())
                .nest("/orders", init_orders_router())
                .nest("/settings", init_settings_router())
                .nest(
                    "/upload",
                    init_upload_router(state.storage_config.max_file_size),
                )
                .nest(
                    "/admin",
                    Router::new()
                        .nest("/users", init_users_router())
                        .nest("/logs", init_logs_router()),
                ),
        );

    // Uploaded files are only served from here when the public URL is a local path.
    if public_base_url.starts_with('/') {
        let mount = public_base_url.trim_end_matches('/');
        if !mount.is_empty() {
            router = router.nest_service(mount, ServeDir::new(upload_dir));
        }
    }

    router
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}
