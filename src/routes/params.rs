//! Query parameters shared by list endpoints.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const fn default_page() -> i64 {
    1
}

const fn default_page_size() -> i64 {
    50
}

const MAX_PAGE_SIZE: i64 = 100;

/// Common pagination parameters applied to list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, rocket::form::FromForm)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// One-based page index.
    #[field(default = 1)]
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page, clamped between 1 and 100.
    #[field(default = 50)]
    #[serde(default = "default_page_size")]
    pub size: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn size(&self) -> i64 {
        self.size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Rows to skip, or a bad request when the page lies beyond `i64` rows.
    pub fn offset(&self) -> Result<i64, ApiError> {
        (self.page() - 1).checked_mul(self.size()).ok_or_else(|| {
            ApiError::BadRequest(format!("page {} is out of range", self.page))
        })
    }
}

/// Query parameters accepted by the food list.
#[derive(Debug, Clone, Serialize, Deserialize, rocket::form::FromForm)]
#[serde(rename_all = "camelCase")]
pub struct FoodListParams {
    /// Food group code, e.g. `0100`.
    #[serde(default)]
    pub group: Option<String>,
    #[field(default = 1)]
    #[serde(default = "default_page")]
    pub page: i64,
    #[field(default = 50)]
    #[serde(default = "default_page_size")]
    pub size: i64,
}

impl Default for FoodListParams {
    fn default() -> Self {
        Self {
            group: None,
            page: default_page(),
            size: default_page_size(),
        }
    }
}

impl FoodListParams {
    /// The group code with surrounding whitespace removed; blank means no filter.
    pub fn group(&self) -> Option<&str> {
        self.group
            .as_deref()
            .map(str::trim)
            .filter(|group| !group.is_empty())
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normalizes_bounds() {
        let params = PaginationParams { page: 0, size: 500 };
        assert_eq!(params.page(), 1);
        assert_eq!(params.size(), 100);
        assert_eq!(params.offset().unwrap(), 0);

        let params = PaginationParams { page: 3, size: 0 };
        assert_eq!(params.size(), 1);
        assert_eq!(params.offset().unwrap(), 2);
    }

    #[test]
    fn test_huge_page_is_a_bad_request() {
        let params = PaginationParams {
            page: i64::MAX,
            size: 100,
        };
        let err = params.offset().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.status(), rocket::http::Status::BadRequest);

        let last_safe = PaginationParams {
            page: i64::MAX / 100,
            size: 100,
        };
        assert!(last_safe.offset().is_ok());
    }

    #[test]
    fn test_blank_group_filter_is_ignored() {
        let params = FoodListParams {
            group: Some("  ".to_string()),
            ..FoodListParams::default()
        };
        assert_eq!(params.group(), None);

        let params = FoodListParams {
            group: Some(" 0100 ".to_string()),
            page: 2,
            size: 10,
        };
        assert_eq!(params.group(), Some("0100"));
        assert_eq!(params.pagination().offset().unwrap(), 10);
    }
}
