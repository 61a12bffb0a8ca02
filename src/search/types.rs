use crate::catalog::types::Course;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Result ordering. Unrecognised names fall back to [`SortKey::NextSessionDate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    #[default]
    NextSessionDate,
}

impl SortKey {
    /// Case-insensitive; anything other than `priceAsc` / `priceDesc` sorts by date.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("priceAsc") {
            SortKey::PriceAsc
        } else if name.eq_ignore_ascii_case("priceDesc") {
            SortKey::PriceDesc
        } else {
            SortKey::NextSessionDate
        }
    }
}

/// Validated, typed search parameters shared by both execution paths.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub category: Option<String>,
    pub course_type: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub sort: SortKey,
    /// Zero-based page index.
    pub page: usize,
    /// Page size, at least 1.
    pub size: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            keyword: None,
            min_age: None,
            max_age: None,
            category: None,
            course_type: None,
            min_price: None,
            max_price: None,
            start_date: None,
            sort: SortKey::default(),
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchParams {
    /// The keyword, if present and not blank.
    pub fn keyword(&self) -> Option<&str> {
        non_blank(self.keyword.as_deref())
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    pub fn course_type(&self) -> Option<&str> {
        non_blank(self.course_type.as_deref())
    }

    /// Index of the first record of the requested page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// One page of courses plus the number of matches before pagination.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total: usize,
    pub courses: Vec<Course>,
}
