//! Offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// Paginated response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// List of items.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub limit: u32,
    pub offset: u32,
    pub total: u64,
    pub has_more: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a paginated response.
    pub fn new(items: Vec<T>, limit: u32, offset: u32, total: u64) -> Self {
        let has_more = u64::from(offset) + (items.len() as u64) < total;

        Self {
            items,
            pagination: PaginationMeta {
                limit,
                offset,
                total,
                has_more,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more() {
        let page = PaginatedResponse::new(vec![1, 2], 2, 0, 5);
        assert!(page.pagination.has_more);

        let page = PaginatedResponse::new(vec![5], 2, 4, 5);
        assert!(!page.pagination.has_more);

        let page: PaginatedResponse<i32> = PaginatedResponse::new(vec![], 100, 10, 5);
        assert!(!page.pagination.has_more);
    }
}
