//! Pagination types for list endpoints

use serde::{Deserialize, Serialize};

/// Rows per page
pub const PAGE_SIZE: i64 = 10;

/// Page number as requested by the client (1-indexed, not yet clamped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
}

impl PageRequest {
    pub fn new(page: i64) -> Self {
        Self { page }
    }

    /// Resolve the request against the total row count.
    ///
    /// - Total pages is `ceil(count / PAGE_SIZE)`, 0 when there are no rows
    /// - Page is clamped to the last page, then to a minimum of 1
    pub fn window(&self, count: i64) -> PageMeta {
        let count = count.max(0);
        let total_pages = (count + PAGE_SIZE - 1) / PAGE_SIZE;
        let page = self.page.min(total_pages).max(1);

        PageMeta {
            page,
            total_pages,
            page_size: PAGE_SIZE,
            count,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// Resolved page window, serialized alongside the page items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Current page number (after clamping)
    pub page: i64,
    /// Number of pages across all rows
    pub total_pages: i64,
    /// Rows per page
    pub page_size: i64,
    /// Total rows
    pub count: i64,
}

impl PageMeta {
    /// Calculate SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One page of rows
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Query parameters for pagination.
///
/// `page` is kept as a string so malformed values fall back to page 1
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<String>,
}

impl From<PaginationParams> for PageRequest {
    fn from(params: PaginationParams) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(leading_integer)
            .filter(|page| *page != 0)
            .unwrap_or(1);
        Self::new(page)
    }
}

/// Parse the integer prefix of `s` ("3", " 3", "3abc" -> 3).
///
/// Out-of-range values saturate.
fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    let value = match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: &str) -> PaginationParams {
        PaginationParams {
            page: Some(page.to_owned()),
        }
    }

    #[test]
    fn offset_calculation() {
        let meta = PageRequest::new(1).window(100);
        assert_eq!(meta.offset(), 0);

        let meta = PageRequest::new(2).window(100);
        assert_eq!(meta.offset(), 10);

        let meta = PageRequest::new(5).window(100);
        assert_eq!(meta.offset(), 40);
        assert_eq!(meta.limit(), 10);
    }

    #[test]
    fn total_pages() {
        assert_eq!(PageRequest::default().window(0).total_pages, 0);
        assert_eq!(PageRequest::default().window(1).total_pages, 1);
        assert_eq!(PageRequest::default().window(10).total_pages, 1);
        assert_eq!(PageRequest::default().window(25).total_pages, 3);
        assert_eq!(PageRequest::default().window(100).total_pages, 10);
    }

    #[test]
    fn clamps_to_last_page() {
        let meta = PageRequest::new(9).window(25);
        assert_eq!(meta.page, 3);
        assert_eq!(meta.offset(), 20);
    }

    #[test]
    fn clamps_to_first_page() {
        assert_eq!(PageRequest::new(-4).window(25).page, 1);
        assert_eq!(PageRequest::new(0).window(25).page, 1);
    }

    #[test]
    fn empty_table_is_page_one() {
        let meta = PageRequest::new(3).window(0);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.offset(), 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn lenient_page_param() {
        assert_eq!(PageRequest::from(PaginationParams::default()).page, 1);
        assert_eq!(PageRequest::from(params("4")).page, 4);
        assert_eq!(PageRequest::from(params("4abc")).page, 4);
        assert_eq!(PageRequest::from(params("abc")).page, 1);
        assert_eq!(PageRequest::from(params("")).page, 1);
        assert_eq!(PageRequest::from(params("0")).page, 1);
        assert_eq!(PageRequest::from(params("-2")).page, -2);
        assert_eq!(
            PageRequest::from(params("99999999999999999999")).page,
            i64::MAX
        );
    }

    #[test]
    fn meta_serializes_camel_case() {
        let meta = PageRequest::new(2).window(25);
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "page": 2, "totalPages": 3, "pageSize": 10, "count": 25 })
        );
    }
}
