//! Catalog Store
//!
//! The persistence seam for course records. The search core only ever reads
//! the full record set; writes happen once, during bootstrap.
//!
//! Two backends exist: [`InMemoryCatalogStore`] below, and the Elasticsearch
//! adapter in `crate::elastic`, which keeps the records in the same index the
//! fuzzy path queries.

use super::types::Course;
use crate::error::Result;

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Number of records currently held.
    async fn count(&self) -> Result<usize>;

    /// Every record, in no particular order.
    async fn fetch_all(&self) -> Result<Vec<Course>>;

    /// Inserts or replaces records by id.
    async fn save_all(&self, courses: Vec<Course>) -> Result<()>;
}

#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    async fn count(&self) -> Result<usize> {
        (**self).count().await
    }

    async fn fetch_all(&self) -> Result<Vec<Course>> {
        (**self).fetch_all().await
    }

    async fn save_all(&self, courses: Vec<Course>) -> Result<()> {
        (**self).save_all(courses).await
    }
}

/// Process-local store keyed by course id.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    records: DashMap<String, Course>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(courses: Vec<Course>) -> Self {
        let store = Self::new();
        for course in courses {
            store.records.insert(course.id.clone(), course);
        }
        store
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn count(&self) -> Result<usize> {
        Ok(self.records.len())
    }

    async fn fetch_all(&self) -> Result<Vec<Course>> {
        Ok(self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn save_all(&self, courses: Vec<Course>) -> Result<()> {
        let n = courses.len();
        for course in courses {
            self.records.insert(course.id.clone(), course);
        }
        tracing::debug!("Stored {} courses in memory ({} total)", n, self.records.len());
        Ok(())
    }
}
