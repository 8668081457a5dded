use serde::Serialize;

use super::config::PageRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_tournaments: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: usize,
    pub year: Option<i32>,
}

/// Slice one page out of `items`. Pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest, year: Option<i32>) -> (Vec<T>, PaginationInfo) {
    let total = items.len();
    let start = request.offset().min(total);
    let end = start.saturating_add(request.limit).min(total);

    let info = PaginationInfo {
        current_page: request.page,
        total_pages: total.div_ceil(request.limit.max(1)),
        total_tournaments: total,
        has_next_page: request.page.saturating_mul(request.limit) < total,
        has_prev_page: request.page > 1,
        limit: request.limit,
        year,
    };

    (items[start..end].to_vec(), info)
}
