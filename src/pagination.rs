use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

#[derive(Deserialize, IntoParams)]
pub struct Pagination {
    #[param(default = 1, minimum = 1)]
    pub page: Option<u64>,
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit_or(DEFAULT_LIMIT)
    }

    pub fn limit_or(&self, default: u64) -> u64 {
        self.limit.unwrap_or(default).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageMeta {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        // Pages are 1-based; clamp here too so a raw 0 cannot underflow.
        let page = page.max(1);
        let limit = limit.max(1);
        PageMeta {
            current_page: page,
            total_pages: total.div_ceil(limit),
            has_next: (page - 1) * limit + limit < total,
            has_prev: page > 1,
        }
    }

    /// Pagination block with the per-entity total key, e.g. `totalCourses`.
    pub fn into_json(self, total_key: &str, total: u64) -> Value {
        json!({
            "currentPage": self.current_page,
            "totalPages": self.total_pages,
            total_key: total,
            "hasNext": self.has_next,
            "hasPrev": self.has_prev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let meta = PageMeta::new(1, 10, 23);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn last_page_has_no_next() {
        let meta = PageMeta::new(3, 10, 23);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn exact_multiple_of_limit() {
        let meta = PageMeta::new(2, 10, 20);
        assert_eq!(meta.total_pages, 2);
        assert!(!meta.has_next);
    }

    #[test]
    fn page_zero_is_treated_as_first() {
        let meta = PageMeta::new(0, 10, 23);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn params_are_clamped() {
        let p = Pagination {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 100);
        assert_eq!(p.offset(), 0);

        let p = Pagination {
            page: None,
            limit: None,
        };
        assert_eq!(p.page(), 1);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn offset_follows_page() {
        let p = Pagination {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(p.offset(), 20);
    }
}
