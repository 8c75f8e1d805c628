//! Page arithmetic shared by every hotel listing.

/// Raw `page`/`limit` values as they arrive on a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    pub fn new(page: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
            limit: Some(limit.into()),
        }
    }
}

/// Resolved page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

/// Reads a positive whole number; anything else yields `None`.
fn coerce_positive(raw: Option<&str>) -> Option<i64> {
    let n = raw?.trim().parse::<f64>().ok()?;
    (n.is_finite() && n >= 1.0).then(|| n.trunc() as i64)
}

impl PageRequest {
    /// Coerces raw values, falling back to page 1 and `default_limit`, and caps
    /// the limit at `max_limit`.
    pub fn resolve(query: &PageQuery, default_limit: i64, max_limit: i64) -> Self {
        let page = coerce_positive(query.page.as_deref()).unwrap_or(1);
        let limit = coerce_positive(query.limit.as_deref())
            .unwrap_or(default_limit)
            .clamp(1, max_limit.max(1));
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results with its position in the full result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
            total_pages: total_pages(total, request.limit),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / limit)`, or 0 for an empty result set.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total > 0 && limit > 0 {
        (total + limit - 1) / limit
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn resolve(page: Option<&str>, limit: Option<&str>) -> PageRequest {
        let query = PageQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        };
        PageRequest::resolve(&query, 10, 100)
    }

    #[test]
    fn test_defaults_when_absent() {
        assert_eq!(resolve(None, None), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_invalid_values_fall_back() {
        assert_eq!(resolve(Some("abc"), Some("-3")), PageRequest { page: 1, limit: 10 });
        assert_eq!(resolve(Some("0"), Some("0")), PageRequest { page: 1, limit: 10 });
        assert_eq!(resolve(Some("NaN"), Some("inf")), PageRequest { page: 1, limit: 10 });
    }

    #[test]
    fn test_fractions_truncate_and_limit_caps() {
        assert_eq!(resolve(Some("2.9"), Some("5.5")), PageRequest { page: 2, limit: 5 });
        assert_eq!(resolve(Some("3"), Some("500")), PageRequest { page: 3, limit: 100 });
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest { page: 1, limit: 10 }.offset(), 0);
        assert_eq!(PageRequest { page: 3, limit: 20 }.offset(), 40);
    }

    #[test]
    fn test_page_flags() {
        let page: Paginated<u8> = Paginated::new(vec![], PageRequest { page: 2, limit: 10 }, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(page.has_prev());
    }

    proptest! {
        #[test]
        fn prop_total_pages_matches_ceiling(total in 0i64..100_000, limit in 1i64..=100) {
            let pages = total_pages(total, limit);
            if total == 0 {
                prop_assert_eq!(pages, 0);
            } else {
                prop_assert!(pages >= 1);
                prop_assert!((pages - 1) * limit < total);
                prop_assert!(pages * limit >= total);
            }
        }

        #[test]
        fn prop_resolved_window_is_in_bounds(page in ".{0,8}", limit in ".{0,8}") {
            let request = PageRequest::resolve(&PageQuery::new(page, limit), 20, 100);
            prop_assert!(request.page >= 1);
            prop_assert!((1..=100).contains(&request.limit));
            prop_assert!(request.offset() >= 0);
        }
    }
}
