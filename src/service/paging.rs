//! Page arithmetic and the list result type.

use serde::Deserialize;

/// Ordered entities plus the total the backend reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub count: u64,
    pub entities: Vec<T>,
}

/// Zero-based record offset for a 1-based `page`.
///
/// Pages at or below zero clamp to offset 0.
pub fn offset(page: i64, per_page: u32) -> u64 {
    let preceding = u64::try_from(page.saturating_sub(1)).unwrap_or(0);
    preceding.saturating_mul(u64::from(per_page))
}

/// `skip`/`limit` query pairs for a listing.
pub(crate) fn list_query(page: i64, per_page: u32) -> Vec<(&'static str, String)> {
    vec![
        ("skip", offset(page, per_page).to_string()),
        ("limit", per_page.to_string()),
    ]
}

/// Smallest listing that still reports `total`.
pub(crate) fn count_query() -> Vec<(&'static str, String)> {
    vec![("limit", "1".to_string()), ("select", "id".to_string())]
}

/// Any listing envelope, read only for its `total`.
#[derive(Debug, Deserialize)]
pub(crate) struct TotalWire {
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_pages_clamp_to_zero() {
        for page in [0, -1, -50, i64::MIN] {
            for per_page in [1, 10, 30] {
                assert_eq!(offset(page, per_page), 0, "page {page}, per_page {per_page}");
            }
        }
    }

    #[test]
    fn positive_pages_skip_preceding_records() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(2, 10), 10);
        assert_eq!(offset(3, 25), 50);
        for page in 1..20_i64 {
            let expected = u64::try_from(page - 1).unwrap() * 7;
            assert_eq!(offset(page, 7), expected);
        }
    }

    #[test]
    fn huge_pages_saturate() {
        assert_eq!(offset(i64::MAX, u32::MAX), u64::MAX);
    }

    #[test]
    fn list_query_pairs() {
        assert_eq!(
            list_query(3, 10),
            vec![("skip", "20".to_string()), ("limit", "10".to_string())]
        );
    }
}
