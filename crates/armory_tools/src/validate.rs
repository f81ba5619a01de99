//! Data validation utilities.

use std::path::Path;

use armory_core::rulebook::Rulebook;

use crate::error::{Result, ToolError};
use crate::loader::load_roster;

/// Check a rulebook RON file and list every validation issue.
///
/// An empty list means the rulebook is usable.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a rulebook.
pub fn validate_rulebook_file(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let rulebook: Rulebook = ron::from_str(&content)?;
    let issues = rulebook.issues();
    for issue in &issues {
        tracing::warn!(path = %path.display(), "{issue}");
    }
    Ok(issues)
}

/// Check that a roster file loads and every entry references a known unit.
///
/// Returns one message per entry whose unit is missing.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded.
pub fn validate_roster_file(path: &Path, rules: &Rulebook) -> Result<Vec<String>> {
    let roster = load_roster(path, rules)?;
    let issues: Vec<String> = roster
        .entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            roster
                .unit(entry.unit_id)
                .err()
                .map(|e| format!("entry {index}: {e}"))
        })
        .collect();
    for issue in &issues {
        tracing::warn!(path = %path.display(), "{issue}");
    }
    Ok(issues)
}
