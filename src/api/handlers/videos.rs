use crate::api::error::AppError;
use crate::entities::videos;
use crate::repositories::PageRequest;
use crate::services::VideoService;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[allow(unused_imports)]
use super::VideoPage;
use super::{DeleteQuery, PagedResponse};

#[derive(Serialize, ToSchema)]
pub struct VideoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub duration: Option<i32>,
    pub views: i64,
    pub likes: i64,
    pub is_active: bool,
    pub category_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<videos::Model> for VideoResponse {
    fn from(model: videos::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            url: model.url,
            duration: model.duration,
            views: model.views,
            likes: model.likes,
            is_active: model.is_active,
            category_id: model.category_id,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateVideoRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2 to 200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 500, message = "URL must be 1 to 500 characters"))]
    pub url: String,
    /// Duration in seconds
    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration: Option<i32>,
    pub category_id: i64,
    pub user_id: i64,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct UpdateVideoRequest {
    #[validate(length(min = 2, max = 200, message = "Title must be 2 to 200 characters"))]
    pub title: String,
    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 500, message = "URL must be 1 to 500 characters"))]
    pub url: String,
    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration: Option<i32>,
    pub category_id: i64,
    pub user_id: i64,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct ListVideosQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub keyword: Option<String>,
    pub category_id: Option<i64>,
    pub user_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct RankingQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/admin/videos",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort_by" = Option<String>, Query, description = "Sort attribute (default: title)"),
        ("sort_dir" = Option<String>, Query, description = "asc or desc"),
        ("keyword" = Option<String>, Query, description = "Search keyword"),
        ("category_id" = Option<i64>, Query, description = "Filter by category"),
        ("user_id" = Option<i64>, Query, description = "Filter by uploader")
    ),
    responses(
        (status = 200, description = "Paged active videos", body = VideoPage),
        (status = 400, description = "Unknown sort field")
    ),
    tag = "videos"
)]
pub async fn list_videos(
    State(state): State<crate::AppState>,
    Query(query): Query<ListVideosQuery>,
) -> Result<Json<PagedResponse<VideoResponse>>, AppError> {
    let req = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(state.config.default_page_size),
        query.sort_by.as_deref().unwrap_or("title"),
        query.sort_dir.as_deref().unwrap_or("asc"),
    );

    // Keyword search wins over the filters, mirroring the admin listing UI
    let keyword = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty());
    let page = match (keyword, query.category_id, query.user_id) {
        (Some(keyword), _, _) => VideoService::search(&state.db, keyword, &req).await?,
        (None, Some(category_id), Some(user_id)) => {
            VideoService::get_by_category_and_user_paged(&state.db, category_id, user_id, &req)
                .await?
        }
        (None, Some(category_id), None) => {
            VideoService::get_by_category_paged(&state.db, category_id, &req).await?
        }
        (None, None, Some(user_id)) => {
            VideoService::get_by_user_paged(&state.db, user_id, &req).await?
        }
        (None, None, None) => VideoService::get_all_active_paged(&state.db, &req).await?,
    };

    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/admin/videos/most-viewed",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size")
    ),
    responses((status = 200, description = "Videos by descending view count", body = VideoPage)),
    tag = "videos"
)]
pub async fn most_viewed_videos(
    State(state): State<crate::AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<PagedResponse<VideoResponse>>, AppError> {
    let page = VideoService::get_most_viewed(
        &state.db,
        query.page.unwrap_or(0),
        query.size.unwrap_or(state.config.default_page_size),
    )
    .await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/admin/videos/most-liked",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size")
    ),
    responses((status = 200, description = "Videos by descending like count", body = VideoPage)),
    tag = "videos"
)]
pub async fn most_liked_videos(
    State(state): State<crate::AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<PagedResponse<VideoResponse>>, AppError> {
    let page = VideoService::get_most_liked(
        &state.db,
        query.page.unwrap_or(0),
        query.size.unwrap_or(state.config.default_page_size),
    )
    .await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/admin/videos/recent",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size")
    ),
    responses((status = 200, description = "Most recently added videos", body = VideoPage)),
    tag = "videos"
)]
pub async fn recent_videos(
    State(state): State<crate::AppState>,
    Query(query): Query<RankingQuery>,
) -> Result<Json<PagedResponse<VideoResponse>>, AppError> {
    let page = VideoService::get_recent(
        &state.db,
        query.page.unwrap_or(0),
        query.size.unwrap_or(state.config.default_page_size),
    )
    .await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/admin/videos/{id}",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video found", body = VideoResponse),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn get_video(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VideoResponse>, AppError> {
    let video = VideoService::get_active_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Video with id {} not found", id)))?;
    Ok(Json(video.into()))
}

#[utoipa::path(
    post,
    path = "/admin/videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = VideoResponse),
        (status = 400, description = "Validation failed"),
        (status = 422, description = "Referenced category or user missing or inactive")
    ),
    tag = "videos"
)]
pub async fn create_video(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let video = VideoService::create(
        &state.db,
        payload.title,
        payload.description,
        payload.url,
        payload.duration,
        payload.category_id,
        payload.user_id,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(video.into())))
}

#[utoipa::path(
    put,
    path = "/admin/videos/{id}",
    params(("id" = i64, Path, description = "Video ID")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Video updated", body = VideoResponse),
        (status = 404, description = "Video not found"),
        (status = 422, description = "Referenced category or user missing or inactive")
    ),
    tag = "videos"
)]
pub async fn update_video(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateVideoRequest>,
) -> Result<Json<VideoResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let video = VideoService::update(
        &state.db,
        id,
        payload.title,
        payload.description,
        payload.url,
        payload.duration,
        payload.category_id,
        payload.user_id,
        payload.is_active,
    )
    .await?;

    Ok(Json(video.into()))
}

#[utoipa::path(
    post,
    path = "/admin/videos/{id}/views",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 204, description = "View counted"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn increment_views(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    VideoService::increment_views(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/videos/{id}/likes",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Like counted"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn increment_likes(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    VideoService::increment_likes(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/videos/{id}/activate",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video activated"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn activate_video(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    VideoService::activate(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/videos/{id}/deactivate",
    params(("id" = i64, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video deactivated"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn deactivate_video(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    VideoService::deactivate(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/admin/videos/{id}",
    params(
        ("id" = i64, Path, description = "Video ID"),
        ("hard" = Option<bool>, Query, description = "Permanently remove instead of deactivating")
    ),
    responses(
        (status = 204, description = "Video removed or deactivated"),
        (status = 404, description = "Video not found")
    ),
    tag = "videos"
)]
pub async fn delete_video(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    if query.hard.unwrap_or(false) {
        VideoService::delete(&state.db, id).await?;
    } else {
        VideoService::deactivate(&state.db, id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
