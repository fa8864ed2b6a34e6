use serde::Serialize;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Requested page, 1-based.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Zero-based page index and a page size clamped to `1..=MAX_PER_PAGE`.
    pub fn normalize(self) -> (u64, u64) {
        let index = self.page.saturating_sub(1);
        let size = self.per_page.clamp(1, MAX_PER_PAGE);
        (u64::from(index), u64::from(size))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: DEFAULT_PER_PAGE } }
}

/// One page of a feed with the totals a pager needs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_zero_means_first_page() {
        assert_eq!(Pagination { page: 0, per_page: 0 }.normalize(), (0, 1));
        assert_eq!(Pagination { page: 1, per_page: 20 }.normalize(), (0, 20));
    }

    #[test]
    fn oversized_pages_are_capped() {
        assert_eq!(Pagination { page: 5, per_page: 1000 }.normalize(), (4, 100));
    }

    #[test]
    fn page_serializes_camel_case() {
        let p = Page { items: vec![1, 2], page: 1, per_page: 2, total: 3, total_pages: 2 };
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["perPage"], 2);
        assert_eq!(v["totalPages"], 2);
    }
}
