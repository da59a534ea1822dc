use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Validated 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> ApiResult<Self> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        let mut problems = Vec::new();
        if page < 1 {
            problems.push(format!("page must be a positive integer, got {}", page));
        }
        if limit < 1 {
            problems.push(format!("limit must be a positive integer, got {}", limit));
        }
        if !problems.is_empty() {
            return Err(ApiError::validation_with("Invalid pagination parameters", problems));
        }

        Ok(Self { page, limit })
    }

    pub fn window(&self) -> Window {
        Window {
            offset: (self.page - 1).saturating_mul(self.limit),
            limit: self.limit,
        }
    }
}

/// Slice of a result sequence: skip `offset` rows, take at most `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

impl Window {
    /// Applies the window to an already ordered sequence.
    pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(offset).take(limit).collect()
    }
}

/// Windowed rows plus the size of the full match, as returned by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub total_docs: i64,
    pub limit: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_page: Option<i64>,
    pub prev_page: Option<i64>,
}

impl<T> Paginated<T> {
    pub fn assemble(page: Page<T>, params: PageParams) -> Self {
        let total_docs = page.total.max(0);
        // ceil without `total + limit - 1`, which overflows for huge limits
        let total_pages = total_docs / params.limit + i64::from(total_docs % params.limit != 0);
        let has_next_page = params.page < total_pages;
        let has_prev_page = params.page > 1;

        Self {
            results: page.items,
            total_docs,
            limit: params.limit,
            total_pages,
            current_page: params.page,
            has_next_page,
            has_prev_page,
            next_page: has_next_page.then(|| params.page + 1),
            prev_page: has_prev_page.then(|| params.page - 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(n: usize, total: i64) -> Page<usize> {
        Page {
            items: (0..n).collect(),
            total,
        }
    }

    #[test]
    fn defaults_to_first_page_of_ten() {
        let params = PageParams::new(None, None).unwrap();
        assert_eq!(params, PageParams { page: 1, limit: 10 });
        assert_eq!(params.window(), Window { offset: 0, limit: 10 });
    }

    #[test]
    fn rejects_non_positive_values() {
        assert!(PageParams::new(Some(0), None).is_err());
        assert!(PageParams::new(None, Some(0)).is_err());
        match PageParams::new(Some(-1), Some(-5)) {
            Err(err) => assert_eq!(err.details().len(), 2),
            Ok(_) => panic!("negative page and limit must be rejected"),
        }
    }

    #[test]
    fn window_offset_follows_page() {
        let params = PageParams::new(Some(3), Some(7)).unwrap();
        assert_eq!(params.window(), Window { offset: 14, limit: 7 });
        assert_eq!(params.window().slice(0..30), (14..21).collect::<Vec<_>>());
    }

    #[test]
    fn total_pages_is_ceiling() {
        for (total, limit, expected) in [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (25, 1, 25)] {
            let params = PageParams::new(Some(1), Some(limit)).unwrap();
            let paginated = Paginated::assemble(page_of(0, total), params);
            assert_eq!(paginated.total_pages, expected, "total={} limit={}", total, limit);
        }
    }

    #[test]
    fn total_pages_survives_the_largest_limit() {
        let params = PageParams::new(Some(1), Some(i64::MAX)).unwrap();
        let paginated = Paginated::assemble(page_of(2, 2), params);
        assert_eq!(paginated.total_pages, 1);
        assert!(!paginated.has_next_page);
        assert_eq!(params.window(), Window { offset: 0, limit: i64::MAX });
    }

    #[test]
    fn middle_page_links_both_ways() {
        let params = PageParams::new(Some(2), Some(5)).unwrap();
        let paginated = Paginated::assemble(page_of(5, 12), params);
        assert!(paginated.has_next_page);
        assert!(paginated.has_prev_page);
        assert_eq!(paginated.next_page, Some(3));
        assert_eq!(paginated.prev_page, Some(1));
    }

    #[test]
    fn page_past_the_end_is_empty_but_keeps_totals() {
        let params = PageParams::new(Some(9), Some(5)).unwrap();
        let paginated = Paginated::assemble(page_of(0, 12), params);
        assert!(paginated.results.is_empty());
        assert_eq!(paginated.total_docs, 12);
        assert_eq!(paginated.total_pages, 3);
        assert!(!paginated.has_next_page);
        assert!(paginated.has_prev_page);
    }
}
