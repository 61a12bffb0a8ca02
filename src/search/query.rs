//! Engine Query Model
//!
//! Engine-neutral description of what the fuzzy and autocomplete paths ask
//! the external index for. Builders here only assemble data; the adapter in
//! `crate::elastic` turns it into wire JSON. Tests assert on these structures
//! directly, without a live engine.

use super::types::{SearchParams, SortKey};
use chrono::{DateTime, Utc};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_MIN_AGE: &str = "minAge";
pub const FIELD_MAX_AGE: &str = "maxAge";
pub const FIELD_PRICE: &str = "price";
pub const FIELD_NEXT_SESSION_DATE: &str = "nextSessionDate";
pub const FIELD_AUTOCOMPLETE: &str = "autocomplete";

/// Name of the completion suggester in requests and responses.
pub const SUGGESTER_NAME: &str = "course-suggest";
/// Maximum number of completions requested.
pub const SUGGEST_SIZE: usize = 5;
/// Highest `from + size` the engine accepts (`index.max_result_window`).
pub const MAX_RESULT_WINDOW: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Engine picks the edit distance from the term length.
    Auto,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RangeValue {
    Int(i64),
    Float(f64),
    Date(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Matches every document.
    MatchAll,
    /// Analysed full-text match.
    Match {
        field: &'static str,
        query: String,
        fuzziness: Fuzziness,
    },
    /// Exact value on a keyword field, compared case-insensitively.
    Term { field: &'static str, value: String },
    /// `field >= value`.
    Gte { field: &'static str, value: RangeValue },
    /// `field <= value`.
    Lte { field: &'static str, value: RangeValue },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Single-field sort. Documents missing the field sort last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub field: &'static str,
    pub order: SortOrder,
}

impl From<SortKey> for SortClause {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::PriceAsc => SortClause {
                field: FIELD_PRICE,
                order: SortOrder::Asc,
            },
            SortKey::PriceDesc => SortClause {
                field: FIELD_PRICE,
                order: SortOrder::Desc,
            },
            SortKey::NextSessionDate => SortClause {
                field: FIELD_NEXT_SESSION_DATE,
                order: SortOrder::Asc,
            },
        }
    }
}

/// A scored text query with AND-ed filters, one sort, and an offset window.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseQuery {
    pub must: Clause,
    pub filters: Vec<Clause>,
    pub sort: SortClause,
    pub from: usize,
    pub size: usize,
}

impl CourseQuery {
    /// Builds the fuzzy query for `params`.
    ///
    /// A blank keyword becomes [`Clause::MatchAll`] rather than an empty match.
    /// Every present optional parameter adds exactly one filter clause.
    ///
    /// The window is clamped to [`MAX_RESULT_WINDOW`]. A page starting past it
    /// asks for no documents, so the engine still reports the total and the
    /// page comes back empty, as on the exact path.
    pub fn fuzzy(params: &SearchParams) -> Self {
        let must = match params.keyword() {
            Some(keyword) => Clause::Match {
                field: FIELD_TITLE,
                query: keyword.to_string(),
                fuzziness: Fuzziness::Auto,
            },
            None => Clause::MatchAll,
        };

        let mut filters = Vec::new();
        if let Some(min_age) = params.min_age {
            filters.push(Clause::Gte {
                field: FIELD_MIN_AGE,
                value: RangeValue::Int(min_age.into()),
            });
        }
        if let Some(max_age) = params.max_age {
            filters.push(Clause::Lte {
                field: FIELD_MAX_AGE,
                value: RangeValue::Int(max_age.into()),
            });
        }
        if let Some(category) = params.category() {
            filters.push(Clause::Term {
                field: FIELD_CATEGORY,
                value: category.to_string(),
            });
        }
        if let Some(course_type) = params.course_type() {
            filters.push(Clause::Term {
                field: FIELD_TYPE,
                value: course_type.to_string(),
            });
        }
        if let Some(min_price) = params.min_price {
            filters.push(Clause::Gte {
                field: FIELD_PRICE,
                value: RangeValue::Float(min_price),
            });
        }
        if let Some(max_price) = params.max_price {
            filters.push(Clause::Lte {
                field: FIELD_PRICE,
                value: RangeValue::Float(max_price),
            });
        }
        if let Some(start_date) = params.start_date {
            filters.push(Clause::Gte {
                field: FIELD_NEXT_SESSION_DATE,
                value: RangeValue::Date(start_date),
            });
        }

        let (from, size) = result_window(params.offset(), params.size);
        Self {
            must,
            filters,
            sort: params.sort.into(),
            from,
            size,
        }
    }

    /// Every document up to `limit`, by session date.
    pub fn all(limit: usize) -> Self {
        Self {
            must: Clause::MatchAll,
            filters: Vec::new(),
            sort: SortKey::NextSessionDate.into(),
            from: 0,
            size: limit,
        }
    }
}

fn result_window(offset: usize, size: usize) -> (usize, usize) {
    if offset >= MAX_RESULT_WINDOW {
        return (0, 0);
    }
    (offset, size.min(MAX_RESULT_WINDOW - offset))
}

/// Prefix completion request against the autocomplete field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestQuery {
    pub name: &'static str,
    pub field: &'static str,
    pub prefix: String,
    pub skip_duplicates: bool,
    pub size: usize,
}

impl SuggestQuery {
    pub fn for_prefix(prefix: &str) -> Self {
        Self {
            name: SUGGESTER_NAME,
            field: FIELD_AUTOCOMPLETE,
            prefix: prefix.to_string(),
            skip_duplicates: true,
            size: SUGGEST_SIZE,
        }
    }
}
