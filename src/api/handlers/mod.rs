pub mod categories;
pub mod health;
pub mod home;
pub mod users;
pub mod videos;

use crate::repositories::page::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use categories::CategoryResponse;
use users::UserResponse;
use videos::VideoResponse;

/// One page of an admin listing plus its totals.
#[derive(Serialize, ToSchema)]
#[aliases(
    CategoryPage = PagedResponse<CategoryResponse>,
    UserPage = PagedResponse<UserResponse>,
    VideoPage = PagedResponse<VideoResponse>
)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T, S> From<Page<S>> for PagedResponse<T>
where
    T: From<S>,
{
    fn from(page: Page<S>) -> Self {
        let page = page.map(T::from);
        Self {
            items: page.items,
            page: page.page,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// `?hard=true` bypasses the soft-delete default on DELETE routes.
#[derive(Deserialize)]
pub struct DeleteQuery {
    pub hard: Option<bool>,
}
