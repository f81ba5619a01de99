//! Trait and ability registry indexed by canonical slug.
//!
//! The registry is immutable once built. It is owned by a
//! [`Rulebook`](crate::rulebook::Rulebook) and passed into every calculator,
//! so tests can price against a small hand-made registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::slug::normalize_slug;
use crate::tables::ModifierTable;

/// Slugs the engine uses for bookkeeping. Never shown, never priced as
/// abilities.
pub const HIDDEN_TRAIT_SLUGS: &[&str] = &["warrior", "shooter"];

/// How a weapon trait changes the weapon's cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeaponTraitRule {
    /// Multiply each attack component.
    Multiplier(f64),
    /// Multiply by `1 + factor × (value − 1)`; missing value counts as 1.
    ScaledByValue {
        /// Increase per point above 1.
        factor: f64,
    },
    /// Add a fixed amount to each attack component.
    Flat(f64),
    /// Multiply each attack component after all other modifiers.
    Surcharge(f64),
    /// Weapon can be used both at range and in melee.
    Assault,
}

/// Named weapon trait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponTraitDefinition {
    /// Display name.
    pub name: String,
    /// Pricing rule.
    pub rule: WeaponTraitRule,
}

/// How an ability is priced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AbilityRule {
    /// Flat price per activation.
    Fixed {
        /// Individual price.
        cost: f64,
        /// Aura/order price; defaults to `cost × aura_scale`.
        #[serde(default)]
        aura: Option<f64>,
    },
    /// Individual use costs `−toughness`, aura use `toughness × aura_scale`.
    ToughnessScaled {
        /// Per-toughness scale for aura/order use.
        aura_scale: f64,
    },
    /// `value × per_point`; missing or textual value costs nothing.
    PerValue {
        /// Price per point of the parameter.
        per_point: f64,
    },
    /// Priced as the defense-row delta of the same slug.
    DefenseModifier,
}

/// Named ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Display name.
    pub name: String,
    /// Pricing rule.
    pub rule: AbilityRule,
}

/// Catalog of named weapon traits, abilities and defense rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitRegistry {
    /// Weapon traits by canonical slug.
    #[serde(default)]
    pub weapon_traits: BTreeMap<String, WeaponTraitDefinition>,

    /// Abilities by canonical slug.
    #[serde(default)]
    pub abilities: BTreeMap<String, AbilityDefinition>,

    /// Per-trait defense rows: the defense cost a model has when it
    /// carries the trait. Keyed by canonical slug, then defense score.
    #[serde(default)]
    pub defense_rows: BTreeMap<String, ModifierTable>,

    /// Alternate slug → canonical slug.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Bookkeeping slugs filtered out before ability pricing.
    #[serde(default = "default_hidden")]
    pub hidden: BTreeSet<String>,
}

fn default_hidden() -> BTreeSet<String> {
    HIDDEN_TRAIT_SLUGS.iter().map(|s| (*s).to_string()).collect()
}

impl Default for TraitRegistry {
    fn default() -> Self {
        Self {
            weapon_traits: BTreeMap::new(),
            abilities: BTreeMap::new(),
            defense_rows: BTreeMap::new(),
            aliases: BTreeMap::new(),
            hidden: default_hidden(),
        }
    }
}

impl TraitRegistry {
    /// Create an empty registry with the default hidden slugs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register a weapon trait.
    #[must_use]
    pub fn with_weapon_trait(mut self, name: &str, rule: WeaponTraitRule) -> Self {
        self.weapon_traits.insert(
            normalize_slug(name),
            WeaponTraitDefinition {
                name: name.to_string(),
                rule,
            },
        );
        self
    }

    /// Builder method to register an ability.
    #[must_use]
    pub fn with_ability(mut self, name: &str, rule: AbilityRule) -> Self {
        self.abilities.insert(
            normalize_slug(name),
            AbilityDefinition {
                name: name.to_string(),
                rule,
            },
        );
        self
    }

    /// Builder method to register a defense row.
    #[must_use]
    pub fn with_defense_row(mut self, name: &str, row: ModifierTable) -> Self {
        self.defense_rows.insert(normalize_slug(name), row);
        self
    }

    /// Builder method to register an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: &str, canonical: &str) -> Self {
        self.aliases
            .insert(normalize_slug(alias), normalize_slug(canonical));
        self
    }

    /// Normalize a name and resolve aliases to the canonical slug.
    #[must_use]
    pub fn canonical(&self, name: &str) -> String {
        let slug = normalize_slug(name);
        match self.aliases.get(&slug) {
            Some(target) => target.clone(),
            None => slug,
        }
    }

    /// Weapon trait rule for a name or slug.
    #[must_use]
    pub fn weapon_rule(&self, name: &str) -> Option<WeaponTraitRule> {
        self.weapon_traits
            .get(&self.canonical(name))
            .map(|def| def.rule)
    }

    /// Ability rule for a name or slug.
    #[must_use]
    pub fn ability_rule(&self, name: &str) -> Option<AbilityRule> {
        self.abilities.get(&self.canonical(name)).map(|def| def.rule)
    }

    /// Defense row for a name or slug.
    #[must_use]
    pub fn defense_row(&self, name: &str) -> Option<&ModifierTable> {
        self.defense_rows.get(&self.canonical(name))
    }

    /// Check whether a slug is an engine bookkeeping marker.
    #[must_use]
    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(&self.canonical(name))
    }

    /// List problems that would make pricing meaningless.
    #[must_use]
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for (slug, def) in &self.weapon_traits {
            match def.rule {
                WeaponTraitRule::Multiplier(m) | WeaponTraitRule::Surcharge(m) if m <= 0.0 => {
                    issues.push(format!("weapon trait '{slug}' has non-positive multiplier {m}"));
                }
                _ => {}
            }
        }

        for (slug, def) in &self.abilities {
            if def.rule == AbilityRule::DefenseModifier && !self.defense_rows.contains_key(slug) {
                issues.push(format!(
                    "ability '{slug}' is a defense modifier without a defense row"
                ));
            }
        }

        for (slug, row) in &self.defense_rows {
            if row.is_empty() {
                issues.push(format!("defense row '{slug}' is empty"));
            }
        }

        for (alias, target) in &self.aliases {
            let known = self.weapon_traits.contains_key(target)
                || self.abilities.contains_key(target)
                || self.defense_rows.contains_key(target)
                || self.hidden.contains(target);
            if !known {
                issues.push(format!("alias '{alias}' points to unknown slug '{target}'"));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TraitRegistry {
        TraitRegistry::new()
            .with_weapon_trait("Przeciążenie", WeaponTraitRule::Surcharge(1.4))
            .with_ability("Delikatny", AbilityRule::DefenseModifier)
            .with_defense_row("Delikatny", ModifierTable::from_pairs(&[(4, 5.0)]))
            .with_alias("Overcharge", "przeciazenie")
            .with_alias("Wojownik", "warrior")
    }

    #[test]
    fn test_canonical_resolves_aliases() {
        let registry = registry();
        assert_eq!(registry.canonical("OVERCHARGE"), "przeciazenie");
        assert_eq!(registry.canonical("Wojownik"), "warrior");
        assert_eq!(registry.canonical("Nieznany"), "nieznany");
    }

    #[test]
    fn test_rule_lookup_is_case_and_diacritic_insensitive() {
        let registry = registry();
        assert_eq!(
            registry.weapon_rule("PRZECIĄŻENIE"),
            Some(WeaponTraitRule::Surcharge(1.4))
        );
        assert_eq!(
            registry.weapon_rule("overcharge"),
            Some(WeaponTraitRule::Surcharge(1.4))
        );
        assert_eq!(registry.ability_rule("delikatny"), Some(AbilityRule::DefenseModifier));
        assert_eq!(registry.weapon_rule("nieznany"), None);
    }

    #[test]
    fn test_hidden_slugs() {
        let registry = registry();
        assert!(registry.is_hidden("warrior"));
        assert!(registry.is_hidden("Wojownik"));
        assert!(!registry.is_hidden("delikatny"));
    }

    #[test]
    fn test_default_keeps_hidden_slugs() {
        let registry = TraitRegistry::default();
        assert!(registry.is_hidden("warrior"));
        assert!(registry.is_hidden("shooter"));
        assert_eq!(registry, TraitRegistry::new());
    }

    #[test]
    fn test_issues_reports_dangling_alias_and_missing_row() {
        let registry = TraitRegistry::new()
            .with_ability("Okopany", AbilityRule::DefenseModifier)
            .with_weapon_trait("Zepsuty", WeaponTraitRule::Multiplier(0.0))
            .with_alias("ghost", "nic");

        let issues = registry.issues();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.contains("okopany")));
        assert!(issues.iter().any(|i| i.contains("zepsuty")));
        assert!(issues.iter().any(|i| i.contains("ghost")));
    }

    #[test]
    fn test_valid_registry_has_no_issues() {
        assert!(registry().issues().is_empty());
    }
}
