//! Parsed trait entries carried by units and weapons.
//!
//! These are the only trait representations the calculators see. Free-text
//! flag strings are turned into them by [`crate::parse`] at the boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameter attached to a trait, e.g. the `3` in `Rozprysk(3)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    /// Numeric parameter.
    Number(f64),
    /// Free-text parameter.
    Text(String),
}

impl TraitValue {
    /// Parse a raw parameter. Decimal commas are accepted.
    ///
    /// Returns `None` for blank input.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match raw.replace(',', ".").parse::<f64>() {
            Ok(n) if n.is_finite() => Some(Self::Number(n)),
            _ => Some(Self::Text(raw.to_string())),
        }
    }

    /// Numeric view of the parameter, if it is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for TraitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Passive trait declared on a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveTraitEntry {
    /// Canonical slug (normalized and de-aliased).
    pub slug: String,
    /// Optional parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<TraitValue>,
    /// Display label, as typed in the catalog.
    pub label: String,
    /// Enabled unless a loadout turns it off.
    pub is_default: bool,
    /// Always enabled; loadout overrides are ignored.
    pub is_mandatory: bool,
}

impl PassiveTraitEntry {
    /// Create a default-on, optional entry.
    #[must_use]
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            value: None,
            label: label.into(),
            is_default: true,
            is_mandatory: false,
        }
    }

    /// Builder method to attach a parameter.
    #[must_use]
    pub fn with_value(mut self, value: TraitValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Builder method to mark the entry mandatory (and therefore default).
    #[must_use]
    pub fn mandatory(mut self) -> Self {
        self.is_mandatory = true;
        self.is_default = true;
        self
    }

    /// Builder method to make the entry available but off by default.
    #[must_use]
    pub fn optional_off(mut self) -> Self {
        self.is_default = false;
        self.is_mandatory = false;
        self
    }
}

/// Trait tag on a weapon, e.g. `Rozprysk(3)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponTrait {
    /// Canonical slug.
    pub slug: String,
    /// Optional parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<TraitValue>,
    /// Display label.
    pub label: String,
}

impl WeaponTrait {
    /// Create a weapon trait without a parameter.
    #[must_use]
    pub fn new(slug: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            value: None,
            label: label.into(),
        }
    }

    /// Builder method to attach a parameter.
    #[must_use]
    pub fn with_value(mut self, value: TraitValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Numeric parameter, if present and numeric.
    #[must_use]
    pub fn number(&self) -> Option<f64> {
        self.value.as_ref().and_then(TraitValue::as_number)
    }
}
