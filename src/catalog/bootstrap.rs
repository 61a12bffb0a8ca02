//! Startup Bootstrap
//!
//! Two idempotent operations run once from `main`, before the HTTP listener is
//! bound:
//!
//! 1. [`ensure_index`] creates the search index (with the course mapping) when
//!    it does not exist yet.
//! 2. [`ensure_seeded`] loads the bundled course payload into the catalog store
//!    when the store is empty.
//!
//! The "store is empty" guard is only safe for a single instance. Two
//! processes starting against the same empty index can both pass the check and
//! load the payload twice; ids are stable in the bundled payload, so the second
//! load overwrites rather than duplicates, but payloads without ids would
//! duplicate.

use super::store::CatalogStore;
use super::types::{Completion, Course};
use crate::error::{CatalogError, Result};
use crate::search::engine::SearchEngine;

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Where the bootstrap payload comes from.
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// A JSON array of courses on disk.
    File(PathBuf),
    /// Courses already in memory.
    Inline(Vec<Course>),
}

impl SeedSource {
    /// Reads the payload. A missing file is reported as [`CatalogError::SeedMissing`].
    pub async fn load(&self) -> Result<Vec<Course>> {
        match self {
            SeedSource::File(path) => {
                let raw = match tokio::fs::read_to_string(path).await {
                    Ok(raw) => raw,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Err(CatalogError::SeedMissing(path.clone()));
                    }
                    Err(e) => return Err(e.into()),
                };
                serde_json::from_str(&raw).map_err(CatalogError::SeedFormat)
            }
            SeedSource::Inline(courses) => Ok(courses.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held records; nothing was loaded.
    AlreadySeeded { existing: usize },
    /// The payload was loaded and saved.
    Seeded { count: usize },
    /// The payload could not be found; the service runs with whatever the store holds.
    SourceMissing,
}

/// Creates the search index if it is absent. Returns `true` when it was created.
pub async fn ensure_index(engine: &dyn SearchEngine) -> Result<bool> {
    if engine.index_exists().await? {
        tracing::info!("Search index already exists, keeping current mapping");
        return Ok(false);
    }

    engine.create_index().await?;
    tracing::info!("Created search index with course mapping");
    Ok(true)
}

/// Loads the seed payload into `store` unless the store already holds records.
pub async fn ensure_seeded(store: &dyn CatalogStore, seed: &SeedSource) -> Result<SeedOutcome> {
    let existing = store.count().await?;
    if existing > 0 {
        tracing::info!(
            "Catalog already has {} courses, skipping bootstrap",
            existing
        );
        return Ok(SeedOutcome::AlreadySeeded { existing });
    }

    let courses = match seed.load().await {
        Ok(courses) => courses,
        Err(CatalogError::SeedMissing(path)) => {
            tracing::warn!(
                "Seed payload {} not found, serving an empty catalog",
                path.display()
            );
            return Ok(SeedOutcome::SourceMissing);
        }
        Err(e) => return Err(e),
    };

    let courses = prepare_seed(courses, Utc::now());
    let count = courses.len();
    store.save_all(courses).await?;

    tracing::info!("Bulk indexed {} courses with autocomplete", count);
    Ok(SeedOutcome::Seeded { count })
}

/// Fills in what the payload may leave out: a session date (`now`), an id
/// (random UUID) and the autocomplete input (the title).
pub fn prepare_seed(courses: Vec<Course>, now: DateTime<Utc>) -> Vec<Course> {
    courses
        .into_iter()
        .map(|mut course| {
            if course.next_session_date.is_none() {
                course.next_session_date = Some(now);
            }
            if course.id.trim().is_empty() {
                course.id = uuid::Uuid::new_v4().to_string();
            }
            course.autocomplete = course.title.as_deref().map(Completion::from_title);
            course
        })
        .collect()
}
