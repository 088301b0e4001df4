//! Reads the course collection out of [`Storage`].
//!
//! The collection is a JSON array stored under a single key. The catalog
//! decodes it fresh on every call and reports corrupt data separately
//! from a missing collection; [`CourseCatalog::find`] folds both into
//! absence for page loaders.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use super::Course;
use crate::consts::COURSES_KEY;
use crate::storage::Storage;

/// What the storage currently holds under the collection key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionState {
    /// Nothing stored, or an empty string.
    Missing,
    /// Stored text that is not a JSON array.
    Corrupt(String),
    /// Array elements that decode as courses, in stored order. Elements
    /// that do not are skipped.
    Loaded(Vec<Course>),
}

impl CollectionState {
    /// Decode a stored blob. `None` and `""` are both missing.
    pub fn decode(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Self::Missing,
            Some(text) => match serde_json::from_str::<Vec<Value>>(text) {
                Ok(items) => Self::Loaded(decode_items(items)),
                Err(e) => Self::Corrupt(e.to_string()),
            },
        }
    }

    /// Courses in stored order; missing and corrupt collections are empty.
    pub fn into_courses(self) -> Vec<Course> {
        match self {
            Self::Loaded(courses) => courses,
            Self::Missing | Self::Corrupt(_) => Vec::new(),
        }
    }
}

fn decode_items(items: Vec<Value>) -> Vec<Course> {
    let total = items.len();
    let courses: Vec<Course> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(course) => Some(course),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed course entry");
                None
            }
        })
        .collect();
    if courses.len() < total {
        debug!(kept = courses.len(), total, "decoded course collection with gaps");
    }
    courses
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("stored course collection under '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Course collection view over a storage handle.
#[derive(Clone)]
pub struct CourseCatalog {
    storage: Arc<dyn Storage>,
    key: String,
}

impl CourseCatalog {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn with_default_key(storage: Arc<dyn Storage>) -> Self {
        Self::new(storage, COURSES_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read and decode the collection.
    pub async fn state(&self) -> Result<CollectionState> {
        let raw = self
            .storage
            .get(&self.key)
            .await
            .with_context(|| format!("failed to read '{}' from storage", self.key))?;
        Ok(CollectionState::decode(raw.as_deref()))
    }

    /// All stored courses. A missing collection is empty; a corrupt one
    /// is an error.
    pub async fn courses(&self) -> Result<Vec<Course>, CatalogError> {
        match self.state().await? {
            CollectionState::Missing => Ok(Vec::new()),
            CollectionState::Loaded(courses) => Ok(courses),
            CollectionState::Corrupt(reason) => Err(CatalogError::Corrupt {
                key: self.key.clone(),
                reason,
            }),
        }
    }

    /// Look up a course by id. Missing and corrupt collections both
    /// yield `None`.
    pub async fn find(&self, id: &str) -> Result<Option<Course>> {
        let state = self.state().await?;
        if let CollectionState::Corrupt(reason) = &state {
            warn!(key = %self.key, %reason, "corrupt course collection, treating as empty");
        }
        let courses = state.into_courses();
        let found = super::find(&courses, id).cloned();
        debug!(id, found = found.is_some(), "course lookup");
        Ok(found)
    }

    /// Overwrite the whole collection.
    pub async fn replace(&self, courses: &[Course]) -> Result<()> {
        let json = serde_json::to_string(courses)?;
        self.storage
            .set(&self.key, &json)
            .await
            .with_context(|| format!("failed to write '{}' to storage", self.key))?;
        debug!(key = %self.key, count = courses.len(), "replaced course collection");
        Ok(())
    }
}
