use crate::api::error::AppError;
use crate::services::{CategoryService, UserService, VideoService};
use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub category_count: u64,
    pub user_count: u64,
    pub video_count: u64,
}

/// Aggregate active counts, served both on the public home route and the
/// admin dashboard.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Active entity counts", body = DashboardResponse)),
    tag = "home"
)]
pub async fn dashboard(
    State(state): State<crate::AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    let category_count = CategoryService::count_active(&state.db).await?;
    let user_count = UserService::count_active(&state.db).await?;
    let video_count = VideoService::count_active(&state.db).await?;

    Ok(Json(DashboardResponse {
        category_count,
        user_count,
        video_count,
    }))
}
