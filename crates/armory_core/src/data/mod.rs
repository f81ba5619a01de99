//! Rulebook content and stored record shapes.
//!
//! [`standard`] holds the built-in balance data. `records` holds the
//! serde shapes the persistence layer stores, with their free-text flag
//! strings, and converts them into engine inputs.
//!
//! **Note:** This module contains no IO - it only defines data. File
//! loading is handled by `armory_tools`.

mod records;
pub mod standard;

pub use records::{AbilityRecord, RosterEntryRecord, RosterRecord, UnitRecord, WeaponRecord};
