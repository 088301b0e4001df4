//! Page loaders for the course routes.
//!
//! Every page shares one loader body, parameterized by where the course
//! comes from: the stored collection or an id-only fabrication.

use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::course::{Course, CourseCatalog};

/// Where a page gets its course from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseSource {
    /// Look the course up in the stored collection.
    Storage,
    /// Build the course from the requested id, ignoring storage.
    Fabricate,
}

/// Per-page loader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    pub source: CourseSource,
    /// `Some(false)` opts the page out of prerendering; `None` keeps the
    /// host's default.
    pub prerender: Option<bool>,
}

/// The course pages served by [`CourseLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Page {
    Course,
    Overview,
    Assignment,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Course, Page::Overview, Page::Assignment];

    pub fn route(&self) -> &'static str {
        match self {
            Page::Course => "/courses/[id]",
            Page::Overview => "/courses/[id]/overview",
            Page::Assignment => "/courses/[id]/assignments/[assignmentId]",
        }
    }

    pub fn options(&self) -> LoaderOptions {
        match self {
            Page::Course => LoaderOptions {
                source: CourseSource::Storage,
                prerender: None,
            },
            // Reads client storage, which does not exist at build time.
            Page::Overview => LoaderOptions {
                source: CourseSource::Storage,
                prerender: Some(false),
            },
            Page::Assignment => LoaderOptions {
                source: CourseSource::Fabricate,
                prerender: None,
            },
        }
    }

    fn needs_assignment_id(&self) -> bool {
        matches!(self, Page::Assignment)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Course => "course",
            Page::Overview => "overview",
            Page::Assignment => "assignment",
        };
        f.write_str(name)
    }
}

/// Path parameters supplied by the router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParams {
    pub id: String,
    pub assignment_id: Option<String>,
}

impl PageParams {
    pub fn course(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            assignment_id: None,
        }
    }

    pub fn assignment(id: impl Into<String>, assignment_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            assignment_id: Some(assignment_id.into()),
        }
    }
}

/// What a loader hands to the page template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub course: Option<Course>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("page '{page}' requires an assignment id")]
    MissingAssignmentId { page: Page },
}

/// Loads page data for any [`Page`].
#[derive(Clone)]
pub struct CourseLoader {
    catalog: CourseCatalog,
}

impl CourseLoader {
    pub fn new(catalog: CourseCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// Run the loader for `page`. Absence and unreadable collections
    /// come back as `course: None`; only storage backend faults and bad
    /// params are errors.
    pub async fn load(&self, page: Page, params: &PageParams) -> Result<PageData> {
        if page.needs_assignment_id() && params.assignment_id.is_none() {
            return Err(LoadError::MissingAssignmentId { page }.into());
        }

        let options = page.options();
        let course = match options.source {
            CourseSource::Storage => self.catalog.find(&params.id).await?,
            CourseSource::Fabricate => Some(Course::fabricate(&params.id)),
        };
        debug!(%page, id = %params.id, found = course.is_some(), "loaded page");

        let assignment_id = if page.needs_assignment_id() {
            params.assignment_id.clone()
        } else {
            None
        };

        Ok(PageData {
            course,
            assignment_id,
        })
    }
}
