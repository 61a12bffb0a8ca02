//! Elasticsearch Wire Protocol
//!
//! Endpoint paths, the index mapping, request encoders for the engine-neutral
//! query model in `crate::search::query`, and the response DTOs decoded by
//! the client.

use crate::catalog::types::Course;
use crate::search::engine::{Hit, SearchHits, SuggestResponse, SuggestionGroup};
use crate::search::query::{Clause, CourseQuery, Fuzziness, RangeValue, SortClause, SortOrder, SuggestQuery};

use chrono::SecondsFormat;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;

// --- API Endpoints ---

/// Index-scoped query endpoint, appended to `/{index}`.
pub const ENDPOINT_SEARCH: &str = "/_search";
/// Index-scoped document count, appended to `/{index}`.
pub const ENDPOINT_COUNT: &str = "/_count";
/// Cluster-wide bulk endpoint. `refresh=true` makes the documents searchable on return.
pub const ENDPOINT_BULK: &str = "/_bulk?refresh=true";

/// Field mapping applied when the index is created.
pub fn course_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "title": { "type": "text" },
                "description": { "type": "text" },
                "category": { "type": "keyword" },
                "type": { "type": "keyword" },
                "gradeRange": { "type": "keyword" },
                "minAge": { "type": "integer" },
                "maxAge": { "type": "integer" },
                "price": { "type": "double" },
                "nextSessionDate": { "type": "date" },
                "autocomplete": { "type": "completion" }
            }
        }
    })
}

// --- Request encoding ---

pub fn encode_search(query: &CourseQuery) -> Value {
    let filters: Vec<Value> = query.filters.iter().map(encode_clause).collect();
    json!({
        "from": query.from,
        "size": query.size,
        "track_total_hits": true,
        "query": {
            "bool": {
                "must": [encode_clause(&query.must)],
                "filter": filters
            }
        },
        "sort": [encode_sort(&query.sort)]
    })
}

pub fn encode_clause(clause: &Clause) -> Value {
    match clause {
        Clause::MatchAll => json!({ "match_all": {} }),
        Clause::Match {
            field,
            query,
            fuzziness,
        } => json!({
            "match": keyed(field, json!({
                "query": query,
                "fuzziness": encode_fuzziness(*fuzziness)
            }))
        }),
        Clause::Term { field, value } => json!({
            "term": keyed(field, json!({
                "value": value,
                "case_insensitive": true
            }))
        }),
        Clause::Gte { field, value } => json!({
            "range": keyed(field, json!({ "gte": encode_range_value(value) }))
        }),
        Clause::Lte { field, value } => json!({
            "range": keyed(field, json!({ "lte": encode_range_value(value) }))
        }),
    }
}

pub fn encode_sort(sort: &SortClause) -> Value {
    let order = match sort.order {
        SortOrder::Asc => "asc",
        SortOrder::Desc => "desc",
    };
    keyed(sort.field, json!({ "order": order, "missing": "_last" }))
}

pub fn encode_suggest(query: &SuggestQuery) -> Value {
    json!({
        "size": 0,
        "_source": false,
        "suggest": keyed(query.name, json!({
            "prefix": query.prefix,
            "completion": {
                "field": query.field,
                "skip_duplicates": query.skip_duplicates,
                "size": query.size
            }
        }))
    })
}

/// NDJSON body indexing every course under its id.
pub fn encode_bulk(index: &str, courses: &[Course]) -> serde_json::Result<String> {
    let mut body = String::new();
    for course in courses {
        let action = json!({ "index": { "_index": index, "_id": course.id } });
        body.push_str(&serde_json::to_string(&action)?);
        body.push('\n');
        body.push_str(&serde_json::to_string(course)?);
        body.push('\n');
    }
    Ok(body)
}

fn encode_fuzziness(fuzziness: Fuzziness) -> &'static str {
    match fuzziness {
        Fuzziness::Auto => "AUTO",
    }
}

fn encode_range_value(value: &RangeValue) -> Value {
    match value {
        RangeValue::Int(v) => json!(v),
        RangeValue::Float(v) => json!(v),
        RangeValue::Date(v) => json!(v.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}

fn keyed(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

// --- Response DTOs ---

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponseBody {
    #[serde(default)]
    pub hits: HitsBody,
    #[serde(default)]
    pub suggest: Option<HashMap<String, Vec<SuggestionBody>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HitsBody {
    #[serde(default)]
    pub total: Option<TotalBody>,
    #[serde(default)]
    pub hits: Vec<HitBody>,
}

/// `{"value": n, "relation": "eq"}` on current versions, a bare number on 6.x.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TotalBody {
    Object { value: u64 },
    Count(u64),
}

impl TotalBody {
    pub fn value(&self) -> u64 {
        match self {
            TotalBody::Object { value } => *value,
            TotalBody::Count(value) => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HitBody {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionBody {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub options: Vec<SuggestOptionBody>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestOptionBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CountResponseBody {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
pub struct BulkResponseBody {
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<Value>,
}

impl BulkResponseBody {
    /// Items carrying an `error` object under their action key.
    pub fn failed_items(&self) -> usize {
        self.items
            .iter()
            .filter(|item| {
                item.as_object()
                    .and_then(|actions| actions.values().next())
                    .is_some_and(|result| result.get("error").is_some())
            })
            .count()
    }
}

impl From<SearchResponseBody> for SearchHits {
    fn from(body: SearchResponseBody) -> Self {
        SearchHits {
            total: body.hits.total.as_ref().map(TotalBody::value),
            hits: body
                .hits
                .hits
                .into_iter()
                .map(|hit| Hit {
                    id: hit.id,
                    source: hit.source,
                })
                .collect(),
        }
    }
}

impl From<SearchResponseBody> for SuggestResponse {
    fn from(body: SearchResponseBody) -> Self {
        let suggest = body
            .suggest
            .unwrap_or_default()
            .into_iter()
            .map(|(name, groups)| {
                let groups = groups
                    .into_iter()
                    .map(|group| SuggestionGroup {
                        text: group.text,
                        options: group.options.into_iter().map(|o| o.text).collect(),
                    })
                    .collect();
                (name, groups)
            })
            .collect();
        SuggestResponse { suggest }
    }
}
