//! Versioned rulebook: modifier tables plus the trait registry.
//!
//! A rulebook is built once and shared read-only by every pricing call.
//! The built-in standard rulebook is lazily created on first use; any
//! other rulebook comes from RON text supplied by the caller.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::data::standard;
use crate::error::{PricingError, Result};
use crate::registry::TraitRegistry;
use crate::tables::RulesTables;

static STANDARD: OnceLock<Rulebook> = OnceLock::new();

/// Immutable bundle of everything the calculators look up.
///
/// # Example RON
///
/// ```ron
/// Rulebook(
///     edition: "house-rules-1",
///     tables: RulesTables(
///         per_attack: { 4: 1.0 },
///         quality_cost: { 4: 10.0 },
///         defense_cost: { 4: 6.0 },
///         per_toughness: 1.5,
///         range_multiplier: { 12: 1.0, 24: 1.25 },
///         melee_multiplier: 1.0,
///         ap_ranged: { 0: 1.0 },
///         ap_melee: { 0: 1.0 },
///         role_discount: 0.5,
///         cost_floor: 0.1,
///         aura_scale: 1.5,
///         reference_defense: 4,
///     ),
///     registry: TraitRegistry(
///         weapon_traits: {
///             "przeciazenie": WeaponTraitDefinition(name: "Przeciążenie", rule: Surcharge(1.4)),
///         },
///     ),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rulebook {
    /// Edition label of the balance data.
    pub edition: String,
    /// Numeric tables and constants.
    pub tables: RulesTables,
    /// Named traits and abilities.
    #[serde(default)]
    pub registry: TraitRegistry,
}

impl Rulebook {
    /// Create a rulebook from parts.
    #[must_use]
    pub fn new(edition: impl Into<String>, tables: RulesTables, registry: TraitRegistry) -> Self {
        Self {
            edition: edition.into(),
            tables,
            registry,
        }
    }

    /// The built-in standard rulebook.
    pub fn standard() -> &'static Rulebook {
        STANDARD.get_or_init(standard::rulebook)
    }

    /// Parse and validate a rulebook from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let rulebook: Self =
            ron::from_str(source).map_err(|e| PricingError::RulebookParse(e.to_string()))?;

        let issues = rulebook.issues();
        if !issues.is_empty() {
            return Err(PricingError::InvalidRulebook(issues));
        }

        tracing::debug!(
            edition = %rulebook.edition,
            abilities = rulebook.registry.abilities.len(),
            weapon_traits = rulebook.registry.weapon_traits.len(),
            "Loaded rulebook"
        );
        Ok(rulebook)
    }

    /// Serialize the rulebook as pretty-printed RON.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| PricingError::RulebookParse(e.to_string()))
    }

    /// List validation problems in tables and registry.
    #[must_use]
    pub fn issues(&self) -> Vec<String> {
        let tables = &self.tables;
        let mut issues = Vec::new();

        let required = [
            ("per_attack", &tables.per_attack),
            ("quality_cost", &tables.quality_cost),
            ("defense_cost", &tables.defense_cost),
            ("range_multiplier", &tables.range_multiplier),
            ("ap_ranged", &tables.ap_ranged),
            ("ap_melee", &tables.ap_melee),
        ];
        for (name, table) in required {
            if table.is_empty() {
                issues.push(format!("table '{name}' is empty"));
            }
        }

        for (name, table) in [
            ("range_multiplier", &tables.range_multiplier),
            ("ap_ranged", &tables.ap_ranged),
            ("ap_melee", &tables.ap_melee),
        ] {
            if let Some((key, value)) = table.iter().find(|(_, v)| *v <= 0.0) {
                issues.push(format!("table '{name}' has non-positive multiplier {value} at {key}"));
            }
        }

        if tables.melee_multiplier <= 0.0 {
            issues.push("melee_multiplier must be positive".to_string());
        }
        if !(0.0..1.0).contains(&tables.role_discount) {
            issues.push(format!(
                "role_discount {} must be in [0, 1)",
                tables.role_discount
            ));
        }
        if tables.cost_floor <= 0.0 {
            issues.push("cost_floor must be positive".to_string());
        }

        issues.extend(self.registry.issues());
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::WeaponTraitRule;

    #[test]
    fn test_standard_rulebook_is_valid() {
        let rulebook = Rulebook::standard();
        assert!(rulebook.issues().is_empty(), "{:?}", rulebook.issues());
    }

    #[test]
    fn test_standard_rulebook_is_shared() {
        assert!(std::ptr::eq(Rulebook::standard(), Rulebook::standard()));
    }

    #[test]
    fn test_standard_survives_ron_export() {
        let rulebook = Rulebook::standard();
        let text = rulebook.to_ron_string().expect("serialize");
        let parsed = Rulebook::from_ron_str(&text).expect("parse");
        assert_eq!(&parsed, rulebook);
    }

    #[test]
    fn test_from_ron_str_hand_written() {
        let source = r#"
            Rulebook(
                edition: "test",
                tables: RulesTables(
                    per_attack: { 4: 1.0 },
                    quality_cost: { 4: 10.0 },
                    defense_cost: { 4: 6.0 },
                    per_toughness: 1.5,
                    range_multiplier: { 12: 1.0, 24: 1.25 },
                    melee_multiplier: 1.0,
                    ap_ranged: { 0: 1.0 },
                    ap_melee: { 0: 1.0 },
                    role_discount: 0.5,
                    cost_floor: 0.1,
                    aura_scale: 1.5,
                    reference_defense: 4,
                ),
                registry: TraitRegistry(
                    weapon_traits: {
                        "przeciazenie": WeaponTraitDefinition(name: "Przeciążenie", rule: Surcharge(1.4)),
                    },
                ),
            )
        "#;

        let rulebook = Rulebook::from_ron_str(source).expect("parse");
        assert_eq!(rulebook.edition, "test");
        assert_eq!(
            rulebook.registry.weapon_rule("Przeciążenie"),
            Some(WeaponTraitRule::Surcharge(1.4))
        );
        assert!(rulebook.registry.is_hidden("warrior"));
    }

    #[test]
    fn test_missing_registry_keeps_hidden_slugs() {
        let source = r#"
            Rulebook(
                edition: "tables only",
                tables: RulesTables(
                    per_attack: { 4: 1.0 },
                    quality_cost: { 4: 10.0 },
                    defense_cost: { 4: 6.0 },
                    per_toughness: 1.5,
                    range_multiplier: { 24: 1.25 },
                    melee_multiplier: 1.0,
                    ap_ranged: { 0: 1.0 },
                    ap_melee: { 0: 1.0 },
                    role_discount: 0.5,
                    cost_floor: 0.1,
                    aura_scale: 1.5,
                    reference_defense: 4,
                ),
            )
        "#;

        let rulebook = Rulebook::from_ron_str(source).expect("parse");
        assert!(rulebook.registry.is_hidden("warrior"));
        assert!(rulebook.registry.is_hidden("shooter"));
        assert_eq!(rulebook.registry, TraitRegistry::new());
    }

    #[test]
    fn test_from_ron_str_rejects_garbage() {
        let err = Rulebook::from_ron_str("not a rulebook").unwrap_err();
        assert!(matches!(err, PricingError::RulebookParse(_)));
    }

    #[test]
    fn test_from_ron_str_rejects_invalid_tables() {
        let mut rulebook = Rulebook::standard().clone();
        rulebook.tables.role_discount = 1.5;
        let text = rulebook.to_ron_string().expect("serialize");

        match Rulebook::from_ron_str(&text) {
            Err(PricingError::InvalidRulebook(issues)) => {
                assert!(issues.iter().any(|i| i.contains("role_discount")));
            }
            other => panic!("expected InvalidRulebook, got {other:?}"),
        }
    }
}
