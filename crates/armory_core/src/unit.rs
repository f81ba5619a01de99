//! Unit records as the engine sees them: stat block, weapons, ability
//! links and passive traits, all already parsed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::TraitRegistry;
use crate::role::{Role, RoleSet};
use crate::traits::{PassiveTraitEntry, TraitValue};
use crate::weapon::{AttackMode, Weapon};

/// Unique identifier for unit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub u32);

/// Identifier of a weapon within a unit's wargear list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponId(pub u32);

/// Identifier of an ability link within a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilityId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quality, defense and toughness of a model.
///
/// Quality and defense are "lower is better" scores, typically 2–6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatBlock {
    /// Hit quality.
    pub quality: u8,
    /// Defense save.
    pub defense: u8,
    /// Wounds per model.
    pub toughness: u32,
}

impl StatBlock {
    /// Create a stat block.
    #[must_use]
    pub const fn new(quality: u8, defense: u8, toughness: u32) -> Self {
        Self {
            quality,
            defense,
            toughness,
        }
    }
}

/// Weapon available to a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitWeapon {
    /// Identifier used by loadouts.
    pub id: WeaponId,
    /// Weapon profile.
    pub weapon: Weapon,
    /// Count per model when no loadout overrides it.
    pub default_count: u32,
}

/// Ability a unit may activate, individually or as an aura/order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityLink {
    /// Identifier used by loadouts.
    pub id: AbilityId,
    /// Canonical slug of the ability.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Optional parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<TraitValue>,
}

impl AbilityLink {
    /// Create a link, resolving the slug through the registry.
    #[must_use]
    pub fn new(id: AbilityId, name: &str, registry: &TraitRegistry) -> Self {
        Self {
            id,
            slug: registry.canonical(name),
            name: name.to_string(),
            value: None,
        }
    }

    /// Builder method to attach a parameter.
    #[must_use]
    pub fn with_value(mut self, value: TraitValue) -> Self {
        self.value = Some(value);
        self
    }
}

/// Parsed unit record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Display name.
    pub name: String,
    /// Stat block shared by every model.
    pub stats: StatBlock,
    /// Passive traits, in declaration order.
    pub passives: Vec<PassiveTraitEntry>,
    /// Wargear options.
    pub weapons: Vec<UnitWeapon>,
    /// Activatable abilities.
    pub abilities: Vec<AbilityLink>,
}

impl Unit {
    /// Create a unit without traits, weapons or abilities.
    #[must_use]
    pub fn new(id: UnitId, name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
            passives: Vec::new(),
            weapons: Vec::new(),
            abilities: Vec::new(),
        }
    }

    /// Builder method to set passive traits.
    #[must_use]
    pub fn with_passives(mut self, passives: Vec<PassiveTraitEntry>) -> Self {
        self.passives = passives;
        self
    }

    /// Builder method to add a weapon.
    #[must_use]
    pub fn with_weapon(mut self, id: WeaponId, weapon: Weapon, default_count: u32) -> Self {
        self.weapons.push(UnitWeapon {
            id,
            weapon,
            default_count,
        });
        self
    }

    /// Builder method to add an ability link.
    #[must_use]
    pub fn with_ability(mut self, link: AbilityLink) -> Self {
        self.abilities.push(link);
        self
    }

    /// Look up a weapon by id.
    #[must_use]
    pub fn weapon(&self, id: WeaponId) -> Option<&UnitWeapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    /// Look up an ability link by id.
    #[must_use]
    pub fn ability(&self, id: AbilityId) -> Option<&AbilityLink> {
        self.abilities.iter().find(|a| a.id == id)
    }

    /// Roles the unit declares in its passive traits.
    #[must_use]
    pub fn available_roles(&self, registry: &TraitRegistry) -> RoleSet {
        self.passives
            .iter()
            .filter_map(|p| Role::from_slug(registry, &p.slug))
            .collect()
    }

    /// Attack modes covered by the given weapons.
    #[must_use]
    pub fn attack_modes<'a>(
        registry: &TraitRegistry,
        weapons: impl IntoIterator<Item = &'a Weapon>,
    ) -> (bool, bool) {
        let mut ranged = false;
        let mut melee = false;
        for weapon in weapons {
            for mode in weapon.modes(registry) {
                match mode {
                    AttackMode::Ranged => ranged = true,
                    AttackMode::Melee => melee = true,
                }
            }
        }
        (ranged, melee)
    }
}
