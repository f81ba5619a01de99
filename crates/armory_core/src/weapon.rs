//! Weapon snapshots and weapon cost calculation.
//!
//! A weapon is priced per attack mode. Each mode component follows:
//!
//! ```text
//! component = (attacks × per_attack(quality) × mode_multiplier × ap_multiplier(mode)
//!              × Π trait multipliers + Σ trait flats)
//!             × Π surcharges
//!             × role_factor (if the unit's role does not specialize in this mode)
//! ```
//!
//! Melee weapons (range 0) have one melee component. Ranged weapons have
//! one ranged component, plus a melee component when tagged as assault.
//! Surcharges and role discounts attach to each component separately.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};
use crate::math::round_with_floor;
use crate::registry::{TraitRegistry, WeaponTraitRule};
use crate::role::Role;
use crate::rulebook::Rulebook;
use crate::tables::RulesTables;
use crate::traits::WeaponTrait;

/// Attack mode of a weapon component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackMode {
    /// Shooting attack.
    Ranged,
    /// Close-combat attack.
    Melee,
}

impl AttackMode {
    /// Role that does not specialize in this mode and gets it discounted.
    #[must_use]
    pub const fn discounted_for(self) -> Role {
        match self {
            Self::Ranged => Role::Warrior,
            Self::Melee => Role::Shooter,
        }
    }
}

/// Immutable weapon profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weapon {
    name: String,
    range: u32,
    attacks: f64,
    ap: i32,
    traits: Vec<WeaponTrait>,
}

impl Weapon {
    /// Create a weapon without traits.
    ///
    /// Range 0 means melee.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeAttacks`] when `attacks` is negative
    /// or not finite.
    pub fn new(name: impl Into<String>, range: u32, attacks: f64, ap: i32) -> Result<Self> {
        if !attacks.is_finite() || attacks < 0.0 {
            return Err(PricingError::NegativeAttacks(attacks));
        }
        Ok(Self {
            name: name.into(),
            range,
            attacks,
            ap,
            traits: Vec::new(),
        })
    }

    /// Builder method to attach traits.
    #[must_use]
    pub fn with_traits(mut self, traits: Vec<WeaponTrait>) -> Self {
        self.traits = traits;
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Range in inches (0 = melee).
    #[must_use]
    pub const fn range(&self) -> u32 {
        self.range
    }

    /// Attacks per activation.
    #[must_use]
    pub const fn attacks(&self) -> f64 {
        self.attacks
    }

    /// Armor piercing.
    #[must_use]
    pub const fn ap(&self) -> i32 {
        self.ap
    }

    /// Weapon traits.
    #[must_use]
    pub fn traits(&self) -> &[WeaponTrait] {
        &self.traits
    }

    /// Check whether this is a melee weapon.
    #[must_use]
    pub const fn is_melee(&self) -> bool {
        self.range == 0
    }

    /// Check whether the weapon carries the assault rule.
    #[must_use]
    pub fn is_assault(&self, registry: &TraitRegistry) -> bool {
        self.traits
            .iter()
            .any(|t| registry.weapon_rule(&t.slug) == Some(WeaponTraitRule::Assault))
    }

    /// Attack modes this weapon is priced for.
    #[must_use]
    pub fn modes(&self, registry: &TraitRegistry) -> Vec<AttackMode> {
        if self.is_melee() {
            vec![AttackMode::Melee]
        } else if self.is_assault(registry) {
            vec![AttackMode::Ranged, AttackMode::Melee]
        } else {
            vec![AttackMode::Ranged]
        }
    }
}

/// Combined effect of a weapon's named traits.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TraitModifiers {
    multiplier: f64,
    flat: f64,
    surcharge: f64,
}

impl TraitModifiers {
    fn collect(registry: &TraitRegistry, traits: &[WeaponTrait]) -> Self {
        let mut modifiers = Self {
            multiplier: 1.0,
            flat: 0.0,
            surcharge: 1.0,
        };

        for t in traits {
            match registry.weapon_rule(&t.slug) {
                Some(WeaponTraitRule::Multiplier(m)) => modifiers.multiplier *= m,
                Some(WeaponTraitRule::ScaledByValue { factor }) => {
                    let value = t.number().unwrap_or(1.0).max(1.0);
                    modifiers.multiplier *= 1.0 + factor * (value - 1.0);
                }
                Some(WeaponTraitRule::Flat(amount)) => modifiers.flat += amount,
                Some(WeaponTraitRule::Surcharge(m)) => modifiers.surcharge *= m,
                Some(WeaponTraitRule::Assault) => {}
                None => {
                    tracing::debug!(trait_slug = %t.slug, "Unknown weapon trait ignored");
                }
            }
        }

        modifiers
    }
}

/// Unrounded per-mode costs of a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeaponComponents {
    /// Ranged component, if the weapon shoots.
    pub ranged: Option<f64>,
    /// Melee component, if the weapon fights in melee.
    pub melee: Option<f64>,
}

impl WeaponComponents {
    /// Sum of present components.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.ranged.unwrap_or(0.0) + self.melee.unwrap_or(0.0)
    }
}

fn component_cost(
    tables: &RulesTables,
    weapon: &Weapon,
    quality: u8,
    modifiers: TraitModifiers,
    mode: AttackMode,
    discounted: bool,
) -> f64 {
    let mode_multiplier = match mode {
        AttackMode::Ranged => tables.range_multiplier_for(weapon.range),
        AttackMode::Melee => tables.melee_multiplier,
    };
    let ap_multiplier = tables.ap_multiplier_for(weapon.ap, mode == AttackMode::Melee);

    let base = weapon.attacks * tables.per_attack_for(quality) * mode_multiplier * ap_multiplier;
    let mut cost = (base * modifiers.multiplier + modifiers.flat) * modifiers.surcharge;
    if discounted {
        cost *= tables.role_factor();
    }

    tracing::trace!(weapon = %weapon.name, ?mode, cost, "Weapon component");
    cost
}

/// Price each attack mode of a weapon separately, without rounding.
#[must_use]
pub fn weapon_components(
    rules: &Rulebook,
    weapon: &Weapon,
    quality: u8,
    unit_traits: &[String],
) -> WeaponComponents {
    let registry = &rules.registry;
    let modifiers = TraitModifiers::collect(registry, &weapon.traits);

    let mut components = WeaponComponents::default();
    for mode in weapon.modes(registry) {
        let discounted = mode.discounted_for().is_in(registry, unit_traits);
        let cost = component_cost(&rules.tables, weapon, quality, modifiers, mode, discounted);
        match mode {
            AttackMode::Ranged => components.ranged = Some(cost),
            AttackMode::Melee => components.melee = Some(cost),
        }
    }
    components
}

/// Point cost of a weapon in the hands of a model of `quality` carrying
/// `unit_traits`.
///
/// Rounded to two decimals and never below the rulebook's cost floor.
/// Unknown traits have no effect.
#[must_use]
pub fn weapon_cost(
    rules: &Rulebook,
    weapon: &Weapon,
    quality: u8,
    unit_traits: &[String],
) -> f64 {
    let total = weapon_components(rules, weapon, quality, unit_traits).total();
    round_with_floor(total, rules.tables.cost_floor)
}

/// Floored but unrounded weapon cost, for aggregation.
#[must_use]
pub(crate) fn weapon_cost_raw(
    rules: &Rulebook,
    weapon: &Weapon,
    quality: u8,
    unit_traits: &[String],
) -> f64 {
    weapon_components(rules, weapon, quality, unit_traits)
        .total()
        .max(rules.tables.cost_floor)
}
