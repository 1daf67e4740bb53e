use crate::api::error::AppError;
use crate::entities::users::{self, UserRole};
use crate::repositories::PageRequest;
use crate::services::UserService;
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
use super::UserPage;
use super::{DeleteQuery, PagedResponse};

/// The password hash never leaves the service layer.
#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            role: model.role,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Full name must be 1 to 100 characters"))]
    pub full_name: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub role: UserRole,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3 to 50 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Full name must be 1 to 100 characters"))]
    pub full_name: String,
    /// Blank or absent keeps the current password
    pub password: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub keyword: Option<String>,
    pub role: Option<UserRole>,
}

#[utoipa::path(
    get,
    path = "/admin/users",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort_by" = Option<String>, Query, description = "Sort attribute (default: username)"),
        ("sort_dir" = Option<String>, Query, description = "asc or desc"),
        ("keyword" = Option<String>, Query, description = "Search keyword"),
        ("role" = Option<UserRole>, Query, description = "Filter by role")
    ),
    responses(
        (status = 200, description = "Paged active users", body = UserPage),
        (status = 400, description = "Unknown sort field")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<PagedResponse<UserResponse>>, AppError> {
    let req = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(state.config.default_page_size),
        query.sort_by.as_deref().unwrap_or("username"),
        query.sort_dir.as_deref().unwrap_or("asc"),
    );

    let keyword = query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty());
    let page = match (keyword, query.role) {
        (Some(keyword), _) => UserService::search(&state.db, keyword, &req).await?,
        (None, Some(role)) => UserService::get_by_role_paged(&state.db, role, &req).await?,
        (None, None) => UserService::get_all_active_paged(&state.db, &req).await?,
    };

    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_active_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/admin/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Username or email already in use")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = UserService::create(
        &state.db,
        payload.username,
        payload.email,
        payload.full_name,
        &payload.password,
        payload.role,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username or email already in use")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = UserService::update(
        &state.db,
        id,
        payload.username,
        payload.email,
        payload.full_name,
        payload.password,
        payload.role,
        payload.is_active,
    )
    .await?;

    Ok(Json(user.into()))
}

#[utoipa::path(
    post,
    path = "/admin/users/{id}/activate",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User activated"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn activate_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    UserService::activate(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/users/{id}/deactivate",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deactivated"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn deactivate_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    UserService::deactivate(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID"),
        ("hard" = Option<bool>, Query, description = "Permanently remove instead of deactivating")
    ),
    responses(
        (status = 204, description = "User removed or deactivated"),
        (status = 404, description = "User not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    if query.hard.unwrap_or(false) {
        UserService::delete(&state.db, id).await?;
    } else {
        UserService::deactivate(&state.db, id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
