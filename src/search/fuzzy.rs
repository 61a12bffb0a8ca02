use super::engine::{Hit, SearchEngine, SearchHits};
use super::query::CourseQuery;
use super::types::{SearchParams, SearchResult};
use crate::catalog::types::Course;
use crate::error::Result;

/// Runs the fuzzy query for `params` against `engine`.
///
/// Engine failures propagate unchanged; there is no partial result.
pub async fn fuzzy_search(engine: &dyn SearchEngine, params: &SearchParams) -> Result<SearchResult> {
    let query = CourseQuery::fuzzy(params);
    let hits = engine.search(&query).await?;
    Ok(normalize_hits(hits))
}

/// Maps engine hits to courses.
///
/// Hits without a payload, or whose payload is not a course, are skipped.
/// The total is the engine's match count; when the engine does not report
/// one, the number of courses on this page stands in for it.
pub fn normalize_hits(hits: SearchHits) -> SearchResult {
    let courses: Vec<Course> = hits.hits.into_iter().filter_map(hit_to_course).collect();
    let total = match hits.total {
        Some(total) => usize::try_from(total).unwrap_or(usize::MAX),
        None => courses.len(),
    };
    SearchResult { total, courses }
}

fn hit_to_course(hit: Hit) -> Option<Course> {
    let Some(source) = hit.source else {
        tracing::debug!("Skipping hit {:?} without source", hit.id);
        return None;
    };

    match serde_json::from_value::<Course>(source) {
        Ok(mut course) => {
            if course.id.is_empty() {
                if let Some(id) = hit.id {
                    course.id = id;
                }
            }
            Some(course)
        }
        Err(e) => {
            tracing::debug!("Skipping malformed hit {:?}: {}", hit.id, e);
            None
        }
    }
}
