//! Base model cost: quality, defense and toughness plus defense-modifying
//! passive traits.
//!
//! A defense trait does not add a flat constant. Each trait owns a
//! defense row; its contribution is the difference between that row and
//! the plain defense cost at the unit's defense score. Contributions of
//! several traits are summed independently, so they stack additively.

use std::collections::BTreeSet;

use crate::math::round_with_floor;
use crate::role::Role;
use crate::rulebook::Rulebook;
use crate::unit::StatBlock;

/// Whether role traits count towards the base cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolePricing {
    /// Role traits contribute their defense delta.
    Include,
    /// Role traits are ignored.
    Exclude,
}

/// Defense delta of a single trait at a defense score.
///
/// Returns `None` when the trait has no defense row.
#[must_use]
pub fn defense_delta(rules: &Rulebook, trait_slug: &str, defense: u8) -> Option<f64> {
    let row = rules.registry.defense_row(trait_slug)?;
    let with_trait = row.lookup_nearest(i32::from(defense))?;
    Some(with_trait - rules.tables.defense_cost_for(defense))
}

/// Sum of defense deltas over distinct traits.
#[must_use]
pub fn defense_modifiers(
    rules: &Rulebook,
    defense: u8,
    traits: &[String],
    roles: RolePricing,
) -> f64 {
    let registry = &rules.registry;
    let distinct: BTreeSet<String> = traits.iter().map(|t| registry.canonical(t)).collect();

    distinct
        .iter()
        .filter(|slug| {
            roles == RolePricing::Include || Role::from_slug(registry, slug.as_str()).is_none()
        })
        .filter_map(|slug| defense_delta(rules, slug, defense))
        .sum()
}

fn unrounded_cost(
    rules: &Rulebook,
    stats: &StatBlock,
    traits: &[String],
    roles: RolePricing,
) -> f64 {
    let tables = &rules.tables;
    tables.quality_cost_for(stats.quality)
        + tables.defense_cost_for(stats.defense)
        + f64::from(stats.toughness) * tables.per_toughness
        + defense_modifiers(rules, stats.defense, traits, roles)
}

/// Per-model base cost, including any role trait present in `traits`.
#[must_use]
pub fn base_model_cost(rules: &Rulebook, stats: &StatBlock, traits: &[String]) -> f64 {
    round_with_floor(
        unrounded_cost(rules, stats, traits, RolePricing::Include),
        rules.tables.cost_floor,
    )
}

/// Per-model base cost ignoring role traits.
#[must_use]
pub fn role_agnostic_base_cost(rules: &Rulebook, stats: &StatBlock, traits: &[String]) -> f64 {
    round_with_floor(
        unrounded_cost(rules, stats, traits, RolePricing::Exclude),
        rules.tables.cost_floor,
    )
}

/// Unrounded per-model base cost, for aggregation.
#[must_use]
pub(crate) fn base_model_cost_raw(
    rules: &Rulebook,
    stats: &StatBlock,
    traits: &[String],
    roles: RolePricing,
) -> f64 {
    unrounded_cost(rules, stats, traits, roles).max(rules.tables.cost_floor)
}
