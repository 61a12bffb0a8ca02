use super::engine::{SearchEngine, SuggestResponse};
use super::query::SuggestQuery;
use crate::error::Result;

use std::collections::HashSet;

/// Title completions for `prefix`, at most five, in engine order.
///
/// A blank prefix short-circuits to an empty list.
pub async fn suggest(engine: &dyn SearchEngine, prefix: &str) -> Result<Vec<String>> {
    if prefix.trim().is_empty() {
        return Ok(Vec::new());
    }

    let query = SuggestQuery::for_prefix(prefix);
    let response = engine.suggest(&query).await?;
    Ok(extract_suggestions(&response, query.name))
}

/// Flattens every option of suggester `name` into one list, first occurrence
/// wins. A response without that suggester yields an empty list.
pub fn extract_suggestions(response: &SuggestResponse, name: &str) -> Vec<String> {
    let Some(groups) = response.suggest.get(name) else {
        return Vec::new();
    };

    let mut seen: HashSet<&String> = HashSet::new();
    groups
        .iter()
        .inspect(|group| {
            tracing::debug!("{} completions for '{}'", group.options.len(), group.text)
        })
        .flat_map(|group| group.options.iter())
        .filter(|text| seen.insert(*text))
        .cloned()
        .collect()
}
