//! Ability cost calculator.
//!
//! Abilities dispatch on their [`AbilityRule`]. Unknown or hidden slugs
//! cost nothing.

use crate::math::round_currency;
use crate::model::defense_delta;
use crate::registry::AbilityRule;
use crate::rulebook::Rulebook;
use crate::traits::TraitValue;
use crate::unit::AbilityLink;

/// How an ability is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbilityUse {
    /// Affects the bearer only.
    #[default]
    Individual,
    /// Broadcast to a squad as an aura or order.
    Aura,
}

/// Unit context an ability is priced in.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbilityContext<'a> {
    /// Canonical slugs of the bearer's active traits.
    pub traits: &'a [String],
    /// Bearer toughness; absent counts as 1.
    pub toughness: Option<u32>,
    /// Bearer defense; absent uses the rulebook's reference defense.
    pub defense: Option<u8>,
    /// Individual or aura/order use.
    pub usage: AbilityUse,
}

impl<'a> AbilityContext<'a> {
    /// Individual use with the given traits.
    #[must_use]
    pub const fn individual(traits: &'a [String]) -> Self {
        Self {
            traits,
            toughness: None,
            defense: None,
            usage: AbilityUse::Individual,
        }
    }

    /// Aura/order use with the given traits.
    #[must_use]
    pub const fn aura(traits: &'a [String]) -> Self {
        Self {
            traits,
            toughness: None,
            defense: None,
            usage: AbilityUse::Aura,
        }
    }

    /// Builder method to set toughness.
    #[must_use]
    pub const fn with_toughness(mut self, toughness: u32) -> Self {
        self.toughness = Some(toughness);
        self
    }

    /// Builder method to set defense.
    #[must_use]
    pub const fn with_defense(mut self, defense: u8) -> Self {
        self.defense = Some(defense);
        self
    }
}

/// Price a named ability.
///
/// The name is normalized and de-aliased first. The result is rounded to
/// two decimals but not floored: abilities may be liabilities.
#[must_use]
pub fn ability_cost_from_name(
    rules: &Rulebook,
    name: &str,
    value: Option<&TraitValue>,
    ctx: &AbilityContext<'_>,
) -> f64 {
    round_currency(ability_cost_raw(rules, name, value, ctx))
}

/// Price an ability link.
#[must_use]
pub fn ability_cost(rules: &Rulebook, link: &AbilityLink, ctx: &AbilityContext<'_>) -> f64 {
    ability_cost_from_name(rules, &link.slug, link.value.as_ref(), ctx)
}

pub(crate) fn ability_cost_raw(
    rules: &Rulebook,
    name: &str,
    value: Option<&TraitValue>,
    ctx: &AbilityContext<'_>,
) -> f64 {
    let registry = &rules.registry;
    let tables = &rules.tables;
    let slug = registry.canonical(name);

    if registry.is_hidden(&slug) {
        return 0.0;
    }
    let Some(rule) = registry.ability_rule(&slug) else {
        tracing::debug!(ability = %slug, "Unknown ability priced at zero");
        return 0.0;
    };

    let aura = ctx.usage == AbilityUse::Aura;
    let cost = match rule {
        AbilityRule::Fixed { cost, aura: aura_cost } => {
            if aura {
                aura_cost.unwrap_or(cost * tables.aura_scale)
            } else {
                cost
            }
        }
        AbilityRule::ToughnessScaled { aura_scale } => {
            let toughness = f64::from(ctx.toughness.unwrap_or(1));
            if aura {
                toughness * aura_scale
            } else {
                -toughness
            }
        }
        AbilityRule::PerValue { per_point } => {
            let base = value.and_then(TraitValue::as_number).unwrap_or(0.0) * per_point;
            if aura {
                base * tables.aura_scale
            } else {
                base
            }
        }
        AbilityRule::DefenseModifier => {
            if ctx.traits.iter().any(|t| registry.canonical(t) == slug) {
                0.0
            } else {
                let defense = ctx.defense.unwrap_or(tables.reference_defense);
                let delta = defense_delta(rules, &slug, defense).unwrap_or(0.0);
                if aura {
                    delta * tables.aura_scale
                } else {
                    delta
                }
            }
        }
    };

    tracing::trace!(ability = %slug, usage = ?ctx.usage, cost, "Ability cost");
    cost
}
