//! Rulebook and roster file loading.

use std::borrow::Cow;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use armory_core::data::RosterRecord;
use armory_core::roster::Roster;
use armory_core::rulebook::Rulebook;

use crate::error::{Result, ToolError};

/// Environment variable naming a rulebook RON file.
pub const RULES_PATH_ENV: &str = "ARMORY_RULES_PATH";

/// Pick the rulebook path from an explicit argument, else an environment
/// value. `None` means the standard rulebook.
#[must_use]
pub fn resolve_rules_path_from(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

/// Pick the rulebook path from an explicit argument, else
/// [`RULES_PATH_ENV`].
#[must_use]
pub fn resolve_rules_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_rules_path_from(explicit, std::env::var_os(RULES_PATH_ENV))
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ToolError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Load and validate a rulebook RON file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, unparseable or
/// fails rulebook validation.
pub fn load_rulebook(path: &Path) -> Result<Rulebook> {
    let content = read_file(path)?;
    let rulebook = Rulebook::from_ron_str(&content)?;
    tracing::info!(path = %path.display(), edition = %rulebook.edition, "Loaded rulebook");
    Ok(rulebook)
}

/// Load the rulebook selected by `explicit` or the environment, falling
/// back to the standard rulebook.
///
/// # Errors
///
/// Returns an error if a selected file cannot be loaded.
pub fn load_rules(explicit: Option<&Path>) -> Result<Cow<'static, Rulebook>> {
    match resolve_rules_path(explicit) {
        Some(path) => load_rulebook(&path).map(Cow::Owned),
        None => {
            tracing::debug!("Using standard rulebook");
            Ok(Cow::Borrowed(Rulebook::standard()))
        }
    }
}

/// Load a roster RON file and convert it with the rulebook's registry.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, unparseable, or
/// holds invalid records.
pub fn load_roster(path: &Path, rules: &Rulebook) -> Result<Roster> {
    let content = read_file(path)?;
    let record: RosterRecord = ron::from_str(&content)?;
    let roster = record.into_roster(&rules.registry)?;
    tracing::info!(
        path = %path.display(),
        units = roster.units.len(),
        entries = roster.entries.len(),
        "Loaded roster"
    );
    Ok(roster)
}
