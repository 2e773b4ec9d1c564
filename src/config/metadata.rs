//! Repository URL discovery from the plugin's `metadata.txt`.
//!
//! QGIS plugins describe themselves in an INI-style `metadata.txt` whose
//! `[general]` section carries a `repository` key. Only that key is read.

use crate::error::ConfigError;
use std::path::Path;

/// Section holding the plugin description
const GENERAL_SECTION: &str = "general";

/// Key of the repository URL in the general section
const REPOSITORY_KEY: &str = "repository";

/// Read `[general] repository` from a plugin metadata file.
pub fn read_repository(metadata_path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(metadata_path).map_err(|source| ConfigError::Read {
        path: metadata_path.to_path_buf(),
        source,
    })?;

    log::debug!("Reading repository url from {}", metadata_path.display());

    find_value(&content, GENERAL_SECTION, REPOSITORY_KEY).ok_or_else(|| {
        ConfigError::InvalidValue {
            field: "repository_url",
            reason: format!(
                "not configured and no [{}] {} key in {}",
                GENERAL_SECTION,
                REPOSITORY_KEY,
                metadata_path.display()
            ),
        }
    })
}

/// Look up `key` in `section`. Keys are case-sensitive, `=` and `:` both
/// separate key from value, and indented continuation lines are skipped.
fn find_value(content: &str, section: &str, key: &str) -> Option<String> {
    let mut current: Option<&str> = None;

    for line in content.lines() {
        // Continuation of a multi-line value
        if line.starts_with([' ', '\t']) {
            continue;
        }

        let line = line.trim_end();
        if line.is_empty() || line.starts_with(['#', ';']) {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = Some(name.trim());
            continue;
        }

        if current != Some(section) {
            continue;
        }

        let Some(pos) = line.find(['=', ':']) else {
            continue;
        };
        let (name, value) = line.split_at(pos);
        if name.trim() == key {
            let value = value[1..].trim();
            if value.is_empty() {
                return None;
            }
            return Some(value.to_string());
        }
    }

    None
}
