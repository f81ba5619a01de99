//! Proptest strategies for pricing inputs.
//!
//! Stat values deliberately run one step past the standard bands on both
//! sides so nearest-key fallbacks are exercised.

use armory_core::unit::StatBlock;
use armory_core::weapon::Weapon;
use proptest::prelude::*;

/// Defense-modifying traits of the standard rulebook.
pub const DEFENSE_TRAITS: &[&str] = &[
    "niewrazliwy",
    "regeneracja",
    "delikatny",
    "szpica",
    "okopany",
];

/// Quality or defense score, 1 to 7.
pub fn arb_score() -> impl Strategy<Value = u8> {
    1u8..=7
}

/// Toughness, 1 to 12.
pub fn arb_toughness() -> impl Strategy<Value = u32> {
    1u32..=12
}

/// Full stat block.
pub fn arb_stat_block() -> impl Strategy<Value = StatBlock> {
    (arb_score(), arb_score(), arb_toughness())
        .prop_map(|(quality, defense, toughness)| StatBlock::new(quality, defense, toughness))
}

/// Attack count in half steps, 0.5 to 10.
pub fn arb_attacks() -> impl Strategy<Value = f64> {
    (1u32..=20).prop_map(|halves| f64::from(halves) / 2.0)
}

/// Armor piercing, including values outside the defined bands.
pub fn arb_ap() -> impl Strategy<Value = i32> {
    -3i32..=6
}

/// Ranged weapon without traits.
pub fn arb_ranged_weapon() -> impl Strategy<Value = Weapon> {
    (1u32..=72, arb_attacks(), arb_ap()).prop_map(|(range, attacks, ap)| {
        Weapon::new("Broń dystansowa", range, attacks, ap).expect("strategy attacks are positive")
    })
}

/// Melee weapon without traits.
pub fn arb_melee_weapon() -> impl Strategy<Value = Weapon> {
    (arb_attacks(), arb_ap()).prop_map(|(attacks, ap)| {
        Weapon::new("Broń biała", 0, attacks, ap).expect("strategy attacks are positive")
    })
}

/// One defense-modifying trait slug.
pub fn arb_defense_trait() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(DEFENSE_TRAITS)
}

/// Two distinct defense-modifying trait slugs.
pub fn arb_defense_trait_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
    proptest::sample::subsequence(DEFENSE_TRAITS, 2).prop_map(|pair| (pair[0], pair[1]))
}
