use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::validate::{validate_catalog, Issue, Severity};
use crate::models::{Catalog, Course, MockExam};

const COURSES_DIR: &str = "courses";
const EXAMS_DIR: &str = "exams";

/// Error type for content loading operations.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read a file or directory.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Failed to parse JSON content.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Content parsed but broke one or more rules.
    #[error(
        "{} has {} content error(s), first: {}",
        .path.display(),
        .issues.len(),
        .issues.first().map(ToString::to_string).unwrap_or_default()
    )]
    Invalid { path: PathBuf, issues: Vec<Issue> },
    /// Nothing to study.
    #[error("{} contains no courses or mock exams", .0.display())]
    Empty(PathBuf),
}

/// Load content from `path` and reject it if validation finds errors.
///
/// `path` is either a JSON file holding a whole catalog, or a directory
/// with `courses/*.json` and `exams/*.json`. Warnings are logged.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let catalog = read_catalog(path)?;

    let (errors, warnings): (Vec<Issue>, Vec<Issue>) = validate_catalog(&catalog)
        .into_iter()
        .partition(|issue| issue.severity == Severity::Error);

    for issue in &warnings {
        warn!(location = %issue.location, "{}", issue.message);
    }
    if !errors.is_empty() {
        return Err(LoadError::Invalid {
            path: path.to_path_buf(),
            issues: errors,
        });
    }

    info!(
        path = %path.display(),
        courses = catalog.courses.len(),
        exams = catalog.exams.len(),
        "loaded content"
    );
    Ok(catalog)
}

/// Parse content without validating it.
pub fn read_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();
    let catalog = if path.is_dir() {
        read_dir_catalog(path)?
    } else {
        read_json(path)?
    };

    if catalog.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    Ok(catalog)
}

fn read_dir_catalog(root: &Path) -> Result<Catalog, LoadError> {
    let courses = json_files(&root.join(COURSES_DIR))?
        .iter()
        .map(|file| read_json::<Course>(file))
        .collect::<Result<Vec<_>, _>>()?;
    let exams = json_files(&root.join(EXAMS_DIR))?
        .iter()
        .map(|file| read_json::<MockExam>(file))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Catalog { courses, exams })
}

/// `*.json` files in `dir`, sorted by name. A missing directory is empty.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "content directory absent");
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let file = entry.path();
        if file.is_file() && file.extension().is_some_and(|ext| ext == "json") {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
