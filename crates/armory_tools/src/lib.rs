//! # Armory Development Tools
//!
//! Command-line tools for development:
//! - Rulebook validation
//! - Standard rulebook export
//! - Roster pricing reports
//!
//! All file IO and environment lookup for the workspace lives here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod error;
pub mod loader;
pub mod report;
pub mod validate;
