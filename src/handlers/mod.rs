pub mod comments;
pub mod dashboard;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;

use serde::Deserialize;

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// `?page=&limit=` query pair used by the list endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Returns (page, limit, offset) with page >= 1 and limit clamped.
    pub fn resolve(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        (page, limit, (page - 1) * limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination {
            page: None,
            limit: None,
        };
        assert_eq!(p.resolve(), (1, 10, 0));
    }

    #[test]
    fn test_pagination_offset() {
        let p = Pagination {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(p.resolve(), (3, 20, 40));
    }

    #[test]
    fn test_pagination_clamps_bad_input() {
        let p = Pagination {
            page: Some(0),
            limit: Some(5000),
        };
        assert_eq!(p.resolve(), (1, 100, 0));

        let p = Pagination {
            page: Some(-2),
            limit: Some(0),
        };
        assert_eq!(p.resolve(), (1, 1, 0));
    }
}
