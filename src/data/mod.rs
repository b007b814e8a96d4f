//! Loading and checking authored course content.

mod loader;
mod validate;

pub use loader::{load_catalog, read_catalog, LoadError};
pub use validate::{validate_catalog, Issue, Severity, MAX_DESCRIPTION_LEN};
