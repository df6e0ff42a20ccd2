//! Standard response envelope
//!
//! Every endpoint answers with the same envelope distinguishing success from
//! failure, carrying a human-readable message plus an optional data or error
//! payload.

use serde::Serialize;

/// Standard API response format
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response with a payload
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Successful response without a payload
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Failure response with an optional error detail
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error,
        }
    }
}

/// Paginated listing payload.
///
/// `total_pages` is derived here from the `(total, page_size)` pair; the
/// service layer only ever reports items and the total count.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PaginatedResponse<T> {
    /// Build a page, computing `total_pages = ceil(total / page_size)`
    pub fn new(items: Vec<T>, total: i64, page: i64, page_size: i64) -> Self {
        let total_pages = if page_size > 0 {
            (total + page_size - 1) / page_size
        } else {
            0
        };

        Self {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let response = ApiResponse::success("User retrieved successfully", 42);
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":42"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_message_only_omits_data() {
        let response = ApiResponse::<()>::message("User deleted successfully");
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_failure_serialization() {
        let response =
            ApiResponse::<()>::failure("Invalid user data", Some("name is empty".to_string()));
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"name is empty\""));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page = PaginatedResponse::<i32>::new(vec![], 21, 1, 10);
        assert_eq!(page.total_pages, 3);

        let exact = PaginatedResponse::<i32>::new(vec![], 20, 1, 10);
        assert_eq!(exact.total_pages, 2);

        let empty = PaginatedResponse::<i32>::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_paginated_serialization() {
        let page = PaginatedResponse::new(vec![1, 2], 5, 1, 2);
        let json = serde_json::to_string(&page).unwrap();

        assert!(json.contains("\"items\":[1,2]"));
        assert!(json.contains("\"total\":5"));
        assert!(json.contains("\"page\":1"));
        assert!(json.contains("\"page_size\":2"));
        assert!(json.contains("\"total_pages\":3"));
    }
}
