use crate::api::error::AppError;
use crate::entities::categories;
use crate::repositories::PageRequest;
use crate::services::CategoryService;
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
use super::CategoryPage;
use super::{DeleteQuery, PagedResponse};

#[derive(Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<categories::Model> for CategoryResponse {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
}

#[derive(Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must not exceed 500 characters"))]
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct ListCategoriesQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub keyword: Option<String>,
}

#[utoipa::path(
    get,
    path = "/admin/categories",
    params(
        ("page" = Option<u64>, Query, description = "Zero-based page index"),
        ("size" = Option<u64>, Query, description = "Page size"),
        ("sort_by" = Option<String>, Query, description = "Sort attribute (default: name)"),
        ("sort_dir" = Option<String>, Query, description = "asc or desc"),
        ("keyword" = Option<String>, Query, description = "Search keyword")
    ),
    responses(
        (status = 200, description = "Paged active categories", body = CategoryPage),
        (status = 400, description = "Unknown sort field")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    Query(query): Query<ListCategoriesQuery>,
) -> Result<Json<PagedResponse<CategoryResponse>>, AppError> {
    let req = PageRequest::new(
        query.page.unwrap_or(0),
        query.size.unwrap_or(state.config.default_page_size),
        query.sort_by.as_deref().unwrap_or("name"),
        query.sort_dir.as_deref().unwrap_or("asc"),
    );

    let page = match query.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(keyword) => CategoryService::search(&state.db, keyword, &req).await?,
        None => CategoryService::get_all_active_paged(&state.db, &req).await?,
    };

    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = CategoryService::get_active_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Name already in use")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category =
        CategoryService::create(&state.db, payload.name, payload.description).await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    params(("id" = i64, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Name already in use")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = CategoryService::update(
        &state.db,
        id,
        payload.name,
        payload.description,
        payload.is_active,
    )
    .await?;

    Ok(Json(category.into()))
}

#[utoipa::path(
    post,
    path = "/admin/categories/{id}/activate",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category activated"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn activate_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    CategoryService::activate(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/admin/categories/{id}/deactivate",
    params(("id" = i64, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deactivated"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn deactivate_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    CategoryService::deactivate(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID"),
        ("hard" = Option<bool>, Query, description = "Permanently remove instead of deactivating")
    ),
    responses(
        (status = 204, description = "Category removed or deactivated"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(query): Query<DeleteQuery>,
) -> Result<StatusCode, AppError> {
    if query.hard.unwrap_or(false) {
        CategoryService::delete(&state.db, id).await?;
    } else {
        CategoryService::deactivate(&state.db, id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
