//! Modifier tables: banded lookups for quality, defense, AP and range.
//!
//! The game only defines costs at discrete breakpoints (AP at −1, 0, 1,
//! 2, …; range at 6", 12", …). Pricing must still tolerate values that
//! fall between or outside those bands, so every banded table offers a
//! nearest-key lookup next to the exact one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable mapping from an integer band to a coefficient or cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierTable {
    entries: BTreeMap<i32, f64>,
}

impl ModifierTable {
    /// Build a table from `(key, value)` pairs. Later duplicates win.
    #[must_use]
    pub fn from_pairs(pairs: &[(i32, f64)]) -> Self {
        Self {
            entries: pairs.iter().copied().collect(),
        }
    }

    /// Exact lookup. Returns `None` when `key` is not a defined band.
    #[must_use]
    pub fn lookup_exact(&self, key: i32) -> Option<f64> {
        self.entries.get(&key).copied()
    }

    /// Lookup falling back to the numerically closest defined key.
    ///
    /// Ties between a lower and a higher neighbour resolve to the lower
    /// key. Returns `None` only for an empty table.
    #[must_use]
    pub fn lookup_nearest(&self, key: i32) -> Option<f64> {
        if let Some(value) = self.lookup_exact(key) {
            return Some(value);
        }

        let below = self.entries.range(..key).next_back();
        let above = self.entries.range(key..).next();

        match (below, above) {
            (Some((&low_key, &low)), Some((&high_key, &high))) => {
                let low_distance = i64::from(key) - i64::from(low_key);
                let high_distance = i64::from(high_key) - i64::from(key);
                if high_distance < low_distance {
                    Some(high)
                } else {
                    Some(low)
                }
            }
            (Some((_, &value)), None) | (None, Some((_, &value))) => Some(value),
            (None, None) => None,
        }
    }

    /// Nearest-key lookup with an explicit value for an empty table.
    #[must_use]
    pub fn nearest_or(&self, key: i32, default: f64) -> f64 {
        self.lookup_nearest(key).unwrap_or(default)
    }

    /// Check whether the table has no bands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.entries.iter().map(|(&k, &v)| (k, v))
    }
}

/// Numeric tables and constants shared by every calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesTables {
    /// Quality → cost of a single attack before range/AP scaling.
    pub per_attack: ModifierTable,

    /// Quality → base cost of a model.
    pub quality_cost: ModifierTable,

    /// Defense → base cost of a model.
    pub defense_cost: ModifierTable,

    /// Cost of each toughness point.
    pub per_toughness: f64,

    /// Range in inches → multiplier for ranged attacks.
    pub range_multiplier: ModifierTable,

    /// Multiplier for melee attacks (range 0).
    pub melee_multiplier: f64,

    /// AP → multiplier for ranged attacks.
    pub ap_ranged: ModifierTable,

    /// AP → multiplier for melee attacks.
    pub ap_melee: ModifierTable,

    /// Fraction removed from off-role weapon components (0.5 halves them).
    pub role_discount: f64,

    /// Smallest cost a weapon or model can have.
    pub cost_floor: f64,

    /// Rescale applied to aura/order use of abilities without an
    /// explicit aura price.
    pub aura_scale: f64,

    /// Defense score used for defense-derived abilities priced without a
    /// unit context.
    pub reference_defense: u8,
}

impl RulesTables {
    /// Multiplier that leaves a cost unchanged.
    pub const NEUTRAL: f64 = 1.0;

    /// Per-attack base for a quality score.
    #[must_use]
    pub fn per_attack_for(&self, quality: u8) -> f64 {
        self.per_attack.nearest_or(i32::from(quality), Self::NEUTRAL)
    }

    /// Range multiplier for a ranged weapon.
    #[must_use]
    pub fn range_multiplier_for(&self, range: u32) -> f64 {
        let band = i32::try_from(range).unwrap_or(i32::MAX);
        self.range_multiplier.nearest_or(band, Self::NEUTRAL)
    }

    /// AP multiplier for the given attack mode.
    #[must_use]
    pub fn ap_multiplier_for(&self, ap: i32, melee: bool) -> f64 {
        let table = if melee { &self.ap_melee } else { &self.ap_ranged };
        table.nearest_or(ap, Self::NEUTRAL)
    }

    /// Base defense cost for a defense score.
    #[must_use]
    pub fn defense_cost_for(&self, defense: u8) -> f64 {
        self.defense_cost.nearest_or(i32::from(defense), 0.0)
    }

    /// Base quality cost for a quality score.
    #[must_use]
    pub fn quality_cost_for(&self, quality: u8) -> f64 {
        self.quality_cost.nearest_or(i32::from(quality), 0.0)
    }

    /// Multiplier applied to an off-role weapon component.
    #[must_use]
    pub fn role_factor(&self) -> f64 {
        1.0 - self.role_discount
    }
}
