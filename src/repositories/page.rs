use crate::api::error::AppError;
use sea_orm::{ConnectionTrait, EntityTrait, FromQueryResult, Order, PaginatorTrait, Select};
use serde::Serialize;

/// Sort direction for paged queries. Anything that is not `desc`
/// (case-insensitive) sorts ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDir::Desc
        } else {
            SortDir::Asc
        }
    }

    pub fn into_order(self) -> Order {
        match self {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        }
    }
}

/// Zero-based page request with a sort attribute name. The attribute is
/// resolved to a concrete column by each repository; an unknown name is
/// rejected with `AppError::InvalidSortField`.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort_by: String,
    pub sort_dir: SortDir,
}

impl PageRequest {
    pub fn new(page: u64, size: u64, sort_by: &str, sort_dir: &str) -> Self {
        Self {
            page,
            size: size.max(1),
            sort_by: sort_by.to_string(),
            sort_dir: SortDir::parse(sort_dir),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Runs an already ordered select as one page. A page index past the end
/// yields an empty slice with the correct totals.
pub async fn fetch_page<C, E>(
    db: &C,
    select: Select<E>,
    req: &PageRequest,
) -> Result<Page<E::Model>, AppError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'static,
{
    fetch_page_at(db, select, req.page, req.size).await
}

pub async fn fetch_page_at<C, E>(
    db: &C,
    select: Select<E>,
    page: u64,
    size: u64,
) -> Result<Page<E::Model>, AppError>
where
    C: ConnectionTrait,
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync + 'static,
{
    let paginator = select.paginate(db, size.max(1));
    let totals = paginator.num_items_and_pages().await?;
    let items = paginator.fetch_page(page).await?;

    Ok(Page {
        items,
        page,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_dir_parse() {
        assert_eq!(SortDir::parse("desc"), SortDir::Desc);
        assert_eq!(SortDir::parse("DESC"), SortDir::Desc);
        assert_eq!(SortDir::parse("asc"), SortDir::Asc);
        assert_eq!(SortDir::parse("ASC"), SortDir::Asc);
        assert_eq!(SortDir::parse("sideways"), SortDir::Asc);
    }

    #[test]
    fn test_page_request_normalizes_size() {
        let req = PageRequest::new(0, 0, "name", "asc");
        assert_eq!(req.size, 1);

        let req = PageRequest::new(2, 25, "name", "desc");
        assert_eq!(req.page, 2);
        assert_eq!(req.size, 25);
        assert_eq!(req.sort_dir, SortDir::Desc);
    }

    #[test]
    fn test_page_map_keeps_totals() {
        let page = Page {
            items: vec![1, 2, 3],
            page: 1,
            total_items: 13,
            total_pages: 5,
        };
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1", "2", "3"]);
        assert_eq!(mapped.page, 1);
        assert_eq!(mapped.total_items, 13);
        assert_eq!(mapped.total_pages, 5);
    }
}
