//! Paged response envelope.

use serde::Serialize;
use utoipa::ToSchema;

use crate::services::Paginated;

/// Generic paged response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (1-based)
    #[schema(example = 1)]
    pub page: i64,

    #[schema(example = 20)]
    pub limit: i64,

    /// Total number of items across all pages
    #[schema(example = 100)]
    pub total: i64,

    /// 0 when there are no items
    #[schema(example = 5)]
    pub total_pages: i64,

    pub has_next: bool,

    pub has_prev: bool,
}

impl<T, U> From<Paginated<U>> for PagedResponse<T>
where
    T: From<U>,
{
    fn from(page: Paginated<U>) -> Self {
        let pagination = PaginationMeta {
            page: page.page,
            limit: page.limit,
            total: page.total,
            total_pages: page.total_pages,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        };
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            pagination,
        }
    }
}
