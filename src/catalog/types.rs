use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single course offering as stored in the catalog and in the search index.
///
/// Every field except `id` is optional on the wire. Records produced by the
/// bootstrap loader always carry a session date and an autocomplete input; any
/// other missing field is handled by the null policy in `search::filter`
/// (the record simply fails predicates that need the field).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// One of `ONE_TIME`, `COURSE`, `CLUB`. Kept as a plain keyword so unknown
    /// values in the payload do not reject the whole record.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_session_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<Completion>,
}

/// Input of the engine's completion suggester.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub input: Vec<String>,
}

impl Completion {
    pub fn from_title(title: &str) -> Self {
        Self {
            input: vec![title.to_string()],
        }
    }
}
