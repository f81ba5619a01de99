//! Error types for the pricing engine.
//!
//! Unknown traits, missing table rows and malformed trait parameters are
//! never errors: they degrade to zero-effect defaults. The variants here
//! cover caller preconditions and rulebook/record loading only.

use thiserror::Error;

use crate::unit::UnitId;

/// Result type alias using [`PricingError`].
pub type Result<T> = std::result::Result<T, PricingError>;

/// Top-level error type for the pricing engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Weapon attack count is negative or not a finite number.
    #[error("Invalid attack count: {0}")]
    NegativeAttacks(f64),

    /// Roster entry references a unit record that does not exist.
    #[error("Unit not found: {0}")]
    UnknownUnit(UnitId),

    /// Two unit records share the same identifier.
    #[error("Duplicate unit ID: {0}")]
    DuplicateUnit(UnitId),

    /// Loadout payload is not a well-formed mapping.
    #[error("Malformed loadout payload: {0}")]
    MalformedLoadout(String),

    /// Rulebook data failed to deserialize.
    #[error("Failed to parse rulebook: {0}")]
    RulebookParse(String),

    /// Rulebook deserialized but failed validation.
    #[error("Invalid rulebook: {}", .0.join("; "))]
    InvalidRulebook(Vec<String>),
}
