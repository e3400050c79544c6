pub mod health;
pub mod tokens;
pub mod trades;
pub mod users;
pub mod prices;
pub mod swap;

pub use health::health_check;
pub use tokens::create_token_routes;
pub use trades::create_trade_routes;
pub use users::create_user_routes;
pub use prices::create_price_routes;
pub use swap::create_swap_routes;

use serde::{Deserialize, Serialize};

/// Envelope every endpoint responds with.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn ok(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_page_count_rounds_up() {
        assert_eq!(Pagination::new(2, 10, 25).pages, 3);
        assert_eq!(Pagination::new(1, 10, 30).pages, 3);
        assert_eq!(Pagination::new(1, 10, 0).pages, 0);
    }

    #[test]
    fn test_pagination_query_defaults() {
        let query = PaginationQuery {
            page: None,
            limit: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);

        let clamped = PaginationQuery {
            page: Some(0),
            limit: Some(1000),
        };
        assert_eq!(clamped.page(), 1);
        assert_eq!(clamped.limit(), 100);
    }
}
