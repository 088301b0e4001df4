pub mod catalog;

pub use catalog::{CatalogError, CollectionState, CourseCatalog};

use serde::{Deserialize, Serialize};

use crate::consts::FABRICATED_NAME_PREFIX;

/// A course record as stored in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
}

impl Course {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build a course from its id alone, without consulting storage.
    /// The display name is `"Course <id>"`.
    pub fn fabricate(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("{FABRICATED_NAME_PREFIX}{id}"),
        }
    }
}

/// Find the first course whose id equals `id` exactly.
pub fn find<'a>(courses: &'a [Course], id: &str) -> Option<&'a Course> {
    courses.iter().find(|course| course.id == id)
}
