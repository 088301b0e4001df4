//! Project-wide constants.

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Storage key the course collection lives under.
pub const COURSES_KEY: &str = "courses";

/// Display name prefix for courses fabricated from an id alone.
pub const FABRICATED_NAME_PREFIX: &str = "Course ";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default database path: `~/.coursebook/coursebook.db`.
pub fn default_db_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("cannot determine home directory")?;
    Ok(home.join(".coursebook").join("coursebook.db"))
}
