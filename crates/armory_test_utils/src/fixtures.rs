//! Test fixtures and helpers.
//!
//! Pre-built units, weapons and rosters priced against the standard
//! rulebook, for consistent testing.

use armory_core::data::RosterRecord;
use armory_core::parse::{parse_flags, parse_weapon_tags};
use armory_core::roster::Roster;
use armory_core::rulebook::Rulebook;
use armory_core::unit::{StatBlock, Unit, UnitId, WeaponId};
use armory_core::weapon::Weapon;

/// Tolerance for comparing computed costs.
pub const COST_EPSILON: f64 = 1e-9;

/// The standard rulebook.
#[must_use]
pub fn rules() -> &'static Rulebook {
    Rulebook::standard()
}

/// Build a trait slug list.
#[must_use]
pub fn traits(slugs: &[&str]) -> Vec<String> {
    slugs.iter().map(|s| (*s).to_string()).collect()
}

/// Create a stat block.
#[must_use]
pub fn stats(quality: u8, defense: u8, toughness: u32) -> StatBlock {
    StatBlock::new(quality, defense, toughness)
}

/// Create a ranged weapon with tags parsed by the standard registry.
///
/// # Panics
///
/// Panics on a negative attack count.
#[must_use]
pub fn ranged(range: u32, attacks: f64, ap: i32, tags: &str) -> Weapon {
    Weapon::new(format!("Broń {range}\""), range, attacks, ap)
        .expect("fixture weapons have valid attacks")
        .with_traits(parse_weapon_tags(tags, &rules().registry))
}

/// Create a melee weapon with tags parsed by the standard registry.
///
/// # Panics
///
/// Panics on a negative attack count.
#[must_use]
pub fn melee(attacks: f64, ap: i32, tags: &str) -> Weapon {
    Weapon::new("Broń biała", 0, attacks, ap)
        .expect("fixture weapons have valid attacks")
        .with_traits(parse_weapon_tags(tags, &rules().registry))
}

/// Create a unit with flags parsed by the standard registry.
#[must_use]
pub fn unit(id: u32, stats: StatBlock, flags: &str) -> Unit {
    Unit::new(UnitId(id), format!("Oddział {id}"), stats)
        .with_passives(parse_flags(flags, &rules().registry))
}

/// Quality 4, defense 4, toughness 6, one 24" A1 AP0 weapon.
#[must_use]
pub fn veteran() -> Unit {
    unit(1, stats(4, 4, 6), "").with_weapon(WeaponId(1), ranged(24, 1.0, 0, ""), 1)
}

/// Quality 4, defense 4, toughness 1 unit with a 24" A2 rifle and an A2
/// AP1 blade, optionally declaring roles in `flags`.
#[must_use]
pub fn dual_role_squad(flags: &str) -> Unit {
    unit(2, stats(4, 4, 1), flags)
        .with_weapon(WeaponId(1), ranged(24, 2.0, 0, ""), 1)
        .with_weapon(WeaponId(2), melee(2.0, 1, ""), 1)
}

/// Parse a RON roster record and convert it with the standard registry.
///
/// # Panics
///
/// Panics if the RON is invalid or the record does not convert.
#[must_use]
pub fn roster_from_ron(source: &str) -> Roster {
    let record: RosterRecord = ron::from_str(source).expect("fixture roster RON is valid");
    record
        .into_roster(&rules().registry)
        .expect("fixture roster converts")
}

/// Assert two costs are equal within [`COST_EPSILON`].
///
/// # Panics
///
/// Panics if the costs differ.
#[track_caller]
pub fn assert_cost_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < COST_EPSILON,
        "cost mismatch: got {actual}, expected {expected}"
    );
}
