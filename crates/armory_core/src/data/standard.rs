//! Built-in standard rulebook.
//!
//! Balance numbers for the default edition. Editions with different
//! numbers are loaded from RON instead of editing this file.

use crate::registry::{AbilityRule, TraitRegistry, WeaponTraitRule};
use crate::rulebook::Rulebook;
use crate::tables::{ModifierTable, RulesTables};

/// Edition label of the built-in rulebook.
pub const STANDARD_EDITION: &str = "standard-1";

/// Standard numeric tables.
#[must_use]
pub fn tables() -> RulesTables {
    RulesTables {
        per_attack: ModifierTable::from_pairs(&[(2, 1.6), (3, 1.3), (4, 1.0), (5, 0.8), (6, 0.6)]),
        quality_cost: ModifierTable::from_pairs(&[
            (2, 16.0),
            (3, 13.0),
            (4, 10.0),
            (5, 7.5),
            (6, 5.0),
        ]),
        defense_cost: defense_base(),
        per_toughness: 1.5,
        range_multiplier: ModifierTable::from_pairs(&[
            (6, 0.75),
            (12, 1.0),
            (18, 1.1),
            (24, 1.25),
            (30, 1.35),
            (36, 1.45),
            (48, 1.6),
        ]),
        melee_multiplier: 1.0,
        ap_ranged: ModifierTable::from_pairs(&[
            (-1, 0.8),
            (0, 1.0),
            (1, 1.25),
            (2, 1.5),
            (3, 1.75),
            (4, 2.0),
        ]),
        ap_melee: ModifierTable::from_pairs(&[
            (-1, 0.85),
            (0, 1.0),
            (1, 1.2),
            (2, 1.4),
            (3, 1.6),
            (4, 1.8),
        ]),
        role_discount: 0.5,
        cost_floor: 0.1,
        aura_scale: 1.5,
        reference_defense: 4,
    }
}

fn defense_base() -> ModifierTable {
    ModifierTable::from_pairs(&[(2, 12.0), (3, 9.0), (4, 6.0), (5, 4.0), (6, 2.0)])
}

/// Standard trait and ability catalog.
#[must_use]
pub fn registry() -> TraitRegistry {
    TraitRegistry::new()
        // Weapon traits
        .with_weapon_trait("Artyleria", WeaponTraitRule::Multiplier(1.3))
        .with_weapon_trait("Nieporęczny", WeaponTraitRule::Multiplier(0.8))
        .with_weapon_trait("Podwójny", WeaponTraitRule::Multiplier(1.5))
        .with_weapon_trait("Precyzyjny", WeaponTraitRule::Multiplier(1.15))
        .with_weapon_trait("Niezawodny", WeaponTraitRule::Multiplier(1.2))
        .with_weapon_trait("Pośredni", WeaponTraitRule::Multiplier(1.2))
        .with_weapon_trait("Rozprysk", WeaponTraitRule::ScaledByValue { factor: 0.5 })
        .with_weapon_trait("Zabójczy", WeaponTraitRule::ScaledByValue { factor: 0.75 })
        .with_weapon_trait("Namierzanie", WeaponTraitRule::Flat(0.5))
        .with_weapon_trait("Przeciążenie", WeaponTraitRule::Surcharge(1.4))
        .with_weapon_trait("Szturmowy", WeaponTraitRule::Assault)
        // Defense rows (defense score -> defense cost with the trait)
        .with_defense_row(
            "Niewrażliwy",
            ModifierTable::from_pairs(&[(2, 14.0), (3, 11.0), (4, 8.5), (5, 6.0), (6, 3.5)]),
        )
        .with_defense_row(
            "Regeneracja",
            ModifierTable::from_pairs(&[(2, 15.0), (3, 12.0), (4, 9.0), (5, 6.5), (6, 4.0)]),
        )
        .with_defense_row(
            "Delikatny",
            ModifierTable::from_pairs(&[(2, 10.5), (3, 7.5), (4, 5.0), (5, 3.25), (6, 1.5)]),
        )
        .with_defense_row(
            "Szpica",
            ModifierTable::from_pairs(&[(2, 13.0), (3, 10.0), (4, 7.5), (5, 5.0), (6, 3.0)]),
        )
        .with_defense_row(
            "Okopany",
            ModifierTable::from_pairs(&[(2, 13.5), (3, 10.5), (4, 8.0), (5, 5.5), (6, 3.0)]),
        )
        .with_defense_row(
            "warrior",
            ModifierTable::from_pairs(&[(2, 12.5), (3, 9.5), (4, 6.5), (5, 4.5), (6, 2.5)]),
        )
        .with_defense_row(
            "shooter",
            ModifierTable::from_pairs(&[(2, 11.75), (3, 8.75), (4, 5.75), (5, 3.75), (6, 1.75)]),
        )
        // Abilities
        .with_ability(
            "Nieustraszony",
            AbilityRule::Fixed {
                cost: 1.5,
                aura: Some(3.0),
            },
        )
        .with_ability(
            "Zwiadowca",
            AbilityRule::Fixed {
                cost: 2.0,
                aura: None,
            },
        )
        .with_ability(
            "Zasadzka",
            AbilityRule::Fixed {
                cost: 2.5,
                aura: None,
            },
        )
        .with_ability(
            "Szybki",
            AbilityRule::Fixed {
                cost: 2.0,
                aura: Some(4.0),
            },
        )
        .with_ability(
            "Powolny",
            AbilityRule::Fixed {
                cost: -1.5,
                aura: None,
            },
        )
        .with_ability(
            "Latanie",
            AbilityRule::Fixed {
                cost: 3.0,
                aura: None,
            },
        )
        .with_ability("Strach", AbilityRule::PerValue { per_point: 1.25 })
        .with_ability("Szał", AbilityRule::ToughnessScaled { aura_scale: 0.5 })
        .with_ability("Furia", AbilityRule::ToughnessScaled { aura_scale: 0.75 })
        .with_ability("Niewrażliwy", AbilityRule::DefenseModifier)
        .with_ability("Regeneracja", AbilityRule::DefenseModifier)
        .with_ability("Delikatny", AbilityRule::DefenseModifier)
        .with_ability("Szpica", AbilityRule::DefenseModifier)
        .with_ability("Okopany", AbilityRule::DefenseModifier)
        // English and alternate names
        .with_alias("Artillery", "artyleria")
        .with_alias("Unwieldy", "nieporeczny")
        .with_alias("Twin", "podwojny")
        .with_alias("Blast", "rozprysk")
        .with_alias("Deadly", "zabojczy")
        .with_alias("Overcharge", "przeciazenie")
        .with_alias("Assault", "szturmowy")
        .with_alias("Fearless", "nieustraszony")
        .with_alias("Scout", "zwiadowca")
        .with_alias("Fragile", "delikatny")
        .with_alias("Regeneration", "regeneracja")
        .with_alias("Wojownik", "warrior")
        .with_alias("Strzelec", "shooter")
}

/// The complete standard rulebook.
#[must_use]
pub fn rulebook() -> Rulebook {
    Rulebook::new(STANDARD_EDITION, tables(), registry())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_rows_share_bands_with_base() {
        let base = defense_base();
        let registry = registry();
        for (slug, row) in &registry.defense_rows {
            let base_keys: Vec<i32> = base.iter().map(|(k, _)| k).collect();
            let row_keys: Vec<i32> = row.iter().map(|(k, _)| k).collect();
            assert_eq!(base_keys, row_keys, "row '{slug}' bands differ from base");
        }
    }

    #[test]
    fn test_every_defense_ability_has_a_row() {
        let registry = registry();
        for (slug, def) in &registry.abilities {
            if def.rule == AbilityRule::DefenseModifier {
                assert!(registry.defense_rows.contains_key(slug), "{slug}");
            }
        }
    }
}
