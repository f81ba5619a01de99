//! Per-roster-entry loadout payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::registry::TraitRegistry;
use crate::unit::{AbilityId, WeaponId};

/// How stored counts relate to the number of models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityMode {
    /// Counts are per model and multiply by the model count.
    #[default]
    PerModel,
    /// Counts are totals for the whole unit.
    Total,
}

impl QuantityMode {
    /// Resolve a stored count into a quantity for `models` models.
    #[must_use]
    pub const fn quantity(self, count: u32, models: u32) -> u32 {
        match self {
            Self::PerModel => count.saturating_mul(models),
            Self::Total => count,
        }
    }
}

/// Selection of wargear, abilities and passive toggles for one entry.
///
/// # Example JSON
///
/// ```json
/// {
///   "weapons": { "1": 1, "2": 0 },
///   "active": { "4": 1 },
///   "aura": {},
///   "passive": { "zwiadowca": 0 },
///   "mode": "per_model"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutPayload {
    /// Weapon id → count. Weapons not listed keep their default count.
    #[serde(default)]
    pub weapons: BTreeMap<WeaponId, u32>,
    /// Ability id → individual activations.
    #[serde(default)]
    pub active: BTreeMap<AbilityId, u32>,
    /// Ability id → aura/order activations.
    #[serde(default)]
    pub aura: BTreeMap<AbilityId, u32>,
    /// Passive slug → enabled (non-zero) or disabled (zero).
    #[serde(default)]
    pub passive: BTreeMap<String, u8>,
    /// Quantity mode for weapon and ability counts.
    #[serde(default)]
    pub mode: QuantityMode,
}

impl LoadoutPayload {
    /// Parse a JSON loadout payload.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MalformedLoadout`] when the payload is not a
    /// JSON object of the expected shape.
    pub fn from_json(source: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(source)
            .map_err(|e| PricingError::MalformedLoadout(e.to_string()))?;
        if !value.is_object() {
            return Err(PricingError::MalformedLoadout(format!(
                "expected an object, got {value}"
            )));
        }
        serde_json::from_value(value).map_err(|e| PricingError::MalformedLoadout(e.to_string()))
    }

    /// Serialize as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| PricingError::MalformedLoadout(e.to_string()))
    }

    /// Builder method to set a weapon count.
    #[must_use]
    pub fn with_weapon(mut self, id: WeaponId, count: u32) -> Self {
        self.weapons.insert(id, count);
        self
    }

    /// Builder method to set individual activations of an ability.
    #[must_use]
    pub fn with_active(mut self, id: AbilityId, count: u32) -> Self {
        self.active.insert(id, count);
        self
    }

    /// Builder method to set aura/order activations of an ability.
    #[must_use]
    pub fn with_aura(mut self, id: AbilityId, count: u32) -> Self {
        self.aura.insert(id, count);
        self
    }

    /// Builder method to toggle a passive trait.
    #[must_use]
    pub fn with_passive(mut self, slug: &str, enabled: bool) -> Self {
        self.passive.insert(slug.to_string(), u8::from(enabled));
        self
    }

    /// Builder method to set the quantity mode.
    #[must_use]
    pub fn with_mode(mut self, mode: QuantityMode) -> Self {
        self.mode = mode;
        self
    }

    /// Passive override for a canonical slug, matching keys through the
    /// registry's normalization and aliases.
    #[must_use]
    pub fn passive_override(&self, registry: &TraitRegistry, slug: &str) -> Option<bool> {
        self.passive
            .iter()
            .find(|(key, _)| registry.canonical(key) == slug)
            .map(|(_, &flag)| flag != 0)
    }
}
