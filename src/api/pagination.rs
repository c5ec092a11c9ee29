use serde::Serialize;

use crate::database::Page;

/// Requested window as derived from `page` and `size`.
/// `None` means the client did not constrain that side of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    /// Concrete `(limit, offset)` for the query, falling back to
    /// `default_limit` rows from the start.
    pub fn window(&self, default_limit: i64) -> (i64, i64) {
        (
            self.limit.unwrap_or(default_limit),
            self.offset.unwrap_or(0),
        )
    }
}

/// `page` is zero-based. A zero `size` counts as absent, and so does a zero
/// `page` for the offset.
pub fn get_pagination(page: Option<i64>, size: Option<i64>) -> Pagination {
    let limit = size.filter(|s| *s != 0);
    let offset = match (page, limit) {
        (Some(p), Some(l)) if p != 0 => Some(p.saturating_mul(l)),
        _ => None,
    };
    Pagination { limit, offset }
}

/// List envelope. Both resources publish their rows under `practitioners`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagingData<T: Serialize> {
    pub total_items: i64,
    pub practitioners: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page_index: Option<i64>,
}

pub fn get_paging_data<T: Serialize>(
    data: Page<T>,
    page: Option<i64>,
    limit: Option<i64>,
) -> PagingData<T> {
    let total_pages = limit.map(|l| data.count / l + i64::from(data.count % l != 0));
    PagingData {
        total_items: data.count,
        practitioners: data.rows,
        total_pages,
        current_page_index: page,
    }
}
