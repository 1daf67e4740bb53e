pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod repositories;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::home::dashboard,
        api::handlers::health::health_check,

        api::handlers::categories::list_categories,
        api::handlers::categories::get_category,
        api::handlers::categories::create_category,
        api::handlers::categories::update_category,
        api::handlers::categories::activate_category,
        api::handlers::categories::deactivate_category,
        api::handlers::categories::delete_category,

        api::handlers::users::list_users,
        api::handlers::users::get_user,
        api::handlers::users::create_user,
        api::handlers::users::update_user,
        api::handlers::users::activate_user,
        api::handlers::users::deactivate_user,
        api::handlers::users::delete_user,

        api::handlers::videos::list_videos,
        api::handlers::videos::most_viewed_videos,
        api::handlers::videos::most_liked_videos,
        api::handlers::videos::recent_videos,
        api::handlers::videos::get_video,
        api::handlers::videos::create_video,
        api::handlers::videos::update_video,
        api::handlers::videos::increment_views,
        api::handlers::videos::increment_likes,
        api::handlers::videos::activate_video,
        api::handlers::videos::deactivate_video,
        api::handlers::videos::delete_video,
    ),
    components(
        schemas(
            api::handlers::home::DashboardResponse,
            api::handlers::health::HealthResponse,
            api::handlers::categories::CategoryResponse,
            api::handlers::categories::CreateCategoryRequest,
            api::handlers::categories::UpdateCategoryRequest,
            api::handlers::users::UserResponse,
            api::handlers::users::CreateUserRequest,
            api::handlers::users::UpdateUserRequest,
            api::handlers::videos::VideoResponse,
            api::handlers::videos::CreateVideoRequest,
            api::handlers::videos::UpdateVideoRequest,
            crate::entities::users::UserRole,
            api::handlers::CategoryPage,
            api::handlers::UserPage,
            api::handlers::VideoPage,
        )
    ),
    tags(
        (name = "home", description = "Public landing data"),
        (name = "categories", description = "Category administration"),
        (name = "users", description = "User administration"),
        (name = "videos", description = "Video administration"),
        (name = "system", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::home::dashboard))
        .route("/admin/dashboard", get(api::handlers::home::dashboard))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/admin/categories",
            get(api::handlers::categories::list_categories)
                .post(api::handlers::categories::create_category),
        )
        .route(
            "/admin/categories/:id",
            get(api::handlers::categories::get_category)
                .put(api::handlers::categories::update_category)
                .delete(api::handlers::categories::delete_category),
        )
        .route(
            "/admin/categories/:id/activate",
            post(api::handlers::categories::activate_category),
        )
        .route(
            "/admin/categories/:id/deactivate",
            post(api::handlers::categories::deactivate_category),
        )
        .route(
            "/admin/users",
            get(api::handlers::users::list_users).post(api::handlers::users::create_user),
        )
        .route(
            "/admin/users/:id",
            get(api::handlers::users::get_user)
                .put(api::handlers::users::update_user)
                .delete(api::handlers::users::delete_user),
        )
        .route(
            "/admin/users/:id/activate",
            post(api::handlers::users::activate_user),
        )
        .route(
            "/admin/users/:id/deactivate",
            post(api::handlers::users::deactivate_user),
        )
        .route(
            "/admin/videos",
            get(api::handlers::videos::list_videos).post(api::handlers::videos::create_video),
        )
        .route(
            "/admin/videos/most-viewed",
            get(api::handlers::videos::most_viewed_videos),
        )
        .route(
            "/admin/videos/most-liked",
            get(api::handlers::videos::most_liked_videos),
        )
        .route("/admin/videos/recent", get(api::handlers::videos::recent_videos))
        .route(
            "/admin/videos/:id",
            get(api::handlers::videos::get_video)
                .put(api::handlers::videos::update_video)
                .delete(api::handlers::videos::delete_video),
        )
        .route(
            "/admin/videos/:id/views",
            post(api::handlers::videos::increment_views),
        )
        .route(
            "/admin/videos/:id/likes",
            post(api::handlers::videos::increment_likes),
        )
        .route(
            "/admin/videos/:id/activate",
            post(api::handlers::videos::activate_video),
        )
        .route(
            "/admin/videos/:id/deactivate",
            post(api::handlers::videos::deactivate_video),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
