//! Stored record shapes.
//!
//! Records carry the free-text flag and tag strings and the JSON loadout
//! text exactly as the persistence layer keeps them. Converting a record
//! runs the mini-parser once, at this boundary, and yields typed engine
//! inputs.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loadout::LoadoutPayload;
use crate::parse::{parse_flags, parse_weapon_tags};
use crate::registry::TraitRegistry;
use crate::roster::{Roster, RosterUnit};
use crate::traits::TraitValue;
use crate::unit::{AbilityId, AbilityLink, StatBlock, Unit, UnitId, WeaponId};
use crate::weapon::Weapon;

const fn default_count() -> u32 {
    1
}

const fn default_toughness() -> u32 {
    1
}

/// Stored weapon profile.
///
/// # Example RON
///
/// ```ron
/// WeaponRecord(
///     id: 1,
///     name: "Karabin plazmowy",
///     range: 24,
///     attacks: 1.0,
///     ap: 2,
///     tags: "Przeciążenie, Rozprysk(3)",
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    /// Identifier used by loadouts.
    pub id: WeaponId,

    /// Display name.
    pub name: String,

    /// Range in inches; 0 means melee.
    #[serde(default)]
    pub range: u32,

    /// Attacks per model.
    pub attacks: f64,

    /// Armor piercing.
    #[serde(default)]
    pub ap: i32,

    /// Comma-separated trait tags.
    #[serde(default)]
    pub tags: String,

    /// Count per model when no loadout overrides it.
    #[serde(default = "default_count")]
    pub default_count: u32,
}

/// Stored ability link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityRecord {
    /// Identifier used by loadouts.
    pub id: AbilityId,

    /// Ability name, any spelling or alias.
    pub name: String,

    /// Raw parameter text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Stored unit.
///
/// # Example RON
///
/// ```ron
/// UnitRecord(
///     id: 10,
///     name: "Weterani",
///     quality: 3,
///     defense: 4,
///     toughness: 1,
///     flags: "Nieustraszony!, Wojownik?, Strzelec?",
///     weapons: [
///         WeaponRecord(id: 1, name: "Karabin", range: 24, attacks: 1.0),
///         WeaponRecord(id: 2, name: "Bagnet", attacks: 1.0, ap: 1),
///     ],
///     abilities: [
///         AbilityRecord(id: 1, name: "Strach", value: Some("2")),
///     ],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    /// Unique identifier.
    pub id: UnitId,

    /// Display name.
    pub name: String,

    /// Hit quality.
    pub quality: u8,

    /// Defense save.
    pub defense: u8,

    /// Wounds per model.
    #[serde(default = "default_toughness")]
    pub toughness: u32,

    /// Comma-separated passive flags with `!`, `?` and bracket syntax.
    #[serde(default)]
    pub flags: String,

    /// Wargear options.
    #[serde(default)]
    pub weapons: Vec<WeaponRecord>,

    /// Activatable abilities.
    #[serde(default)]
    pub abilities: Vec<AbilityRecord>,
}

impl WeaponRecord {
    /// Convert into a typed weapon.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NegativeAttacks`](crate::error::PricingError::NegativeAttacks)
    /// for a negative or non-finite attack count.
    pub fn into_weapon(self, registry: &TraitRegistry) -> Result<Weapon> {
        let traits = parse_weapon_tags(&self.tags, registry);
        Ok(Weapon::new(self.name, self.range, self.attacks, self.ap)?.with_traits(traits))
    }
}

impl AbilityRecord {
    /// Convert into a typed ability link.
    #[must_use]
    pub fn into_link(self, registry: &TraitRegistry) -> AbilityLink {
        let link = AbilityLink::new(self.id, &self.name, registry);
        match self.value.as_deref().and_then(TraitValue::parse) {
            Some(value) => link.with_value(value),
            None => link,
        }
    }
}

impl UnitRecord {
    /// Convert into a typed unit, parsing flags and weapon tags.
    ///
    /// # Errors
    ///
    /// Returns an error if any weapon has an invalid attack count.
    pub fn into_unit(self, registry: &TraitRegistry) -> Result<Unit> {
        let mut unit = Unit::new(
            self.id,
            self.name,
            StatBlock::new(self.quality, self.defense, self.toughness),
        )
        .with_passives(parse_flags(&self.flags, registry));

        for record in self.weapons {
            let (id, default_count) = (record.id, record.default_count);
            unit = unit.with_weapon(id, record.into_weapon(registry)?, default_count);
        }
        for record in self.abilities {
            unit = unit.with_ability(record.into_link(registry));
        }
        Ok(unit)
    }
}

/// Stored roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntryRecord {
    /// Unit record this entry fields.
    pub unit: UnitId,

    /// Number of models.
    #[serde(default = "default_count")]
    pub models: u32,

    /// Loadout payload as JSON text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loadout: Option<String>,

    /// Last computed cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_cost: Option<f64>,
}

impl RosterEntryRecord {
    /// Convert into a typed roster entry.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::MalformedLoadout`](crate::error::PricingError::MalformedLoadout)
    /// if the loadout text is not a JSON object.
    pub fn into_entry(self) -> Result<RosterUnit> {
        let loadout = match self.loadout.as_deref() {
            Some(json) => LoadoutPayload::from_json(json)?,
            None => LoadoutPayload::default(),
        };
        let mut entry = RosterUnit::new(self.unit, self.models).with_loadout(loadout);
        entry.cached_cost = self.cached_cost;
        Ok(entry)
    }
}

/// Stored roster with its unit catalog.
///
/// # Example RON
///
/// ```ron
/// RosterRecord(
///     name: "Patrol",
///     points_limit: Some(500.0),
///     units: [ /* UnitRecord, ... */ ],
///     entries: [
///         RosterEntryRecord(unit: 10, models: 5, loadout: Some("{\"weapons\": {\"2\": 0}}")),
///     ],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRecord {
    /// Display name.
    pub name: String,

    /// Maximum total points.
    #[serde(default)]
    pub points_limit: Option<f64>,

    /// Unit catalog.
    #[serde(default)]
    pub units: Vec<UnitRecord>,

    /// Fielded entries.
    #[serde(default)]
    pub entries: Vec<RosterEntryRecord>,
}

impl RosterRecord {
    /// Convert into a typed roster.
    ///
    /// Entries are not checked against the unit catalog here; pricing
    /// reports missing units.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate unit ids, invalid weapons or
    /// malformed loadouts.
    pub fn into_roster(self, registry: &TraitRegistry) -> Result<Roster> {
        let mut roster = Roster::new(self.name, self.points_limit);
        for record in self.units {
            roster.add_unit(record.into_unit(registry)?)?;
        }
        for record in self.entries {
            roster.add_entry(record.into_entry()?);
        }
        Ok(roster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PricingError;
    use crate::role::Role;
    use crate::rulebook::Rulebook;

    fn registry() -> &'static TraitRegistry {
        &Rulebook::standard().registry
    }

    const UNIT_RON: &str = r#"
        UnitRecord(
            id: 10,
            name: "Weterani",
            quality: 3,
            defense: 4,
            flags: "Nieustraszony!, Wojownik?, Strzelec?",
            weapons: [
                WeaponRecord(id: 1, name: "Karabin", range: 24, attacks: 1.0, tags: "Precyzyjny"),
                WeaponRecord(id: 2, name: "Bagnet", attacks: 1.0, ap: 1),
            ],
            abilities: [
                AbilityRecord(id: 1, name: "Strach", value: Some("1,5")),
            ],
        )
    "#;

    #[test]
    fn test_unit_record_from_ron() {
        let record: UnitRecord = ron::from_str(UNIT_RON).expect("valid RON");
        assert_eq!(record.toughness, 1);
        assert_eq!(record.weapons[1].range, 0);
        assert_eq!(record.weapons[1].default_count, 1);

        let unit = record.into_unit(registry()).expect("valid unit");
        assert_eq!(unit.stats, StatBlock::new(3, 4, 1));
        assert_eq!(unit.passives.len(), 3);
        assert!(unit.passives[0].is_mandatory);
        assert_eq!(unit.available_roles(registry()).len(), 2);
        assert!(unit.available_roles(registry()).contains(Role::Shooter));
        assert_eq!(unit.weapons[0].weapon.traits()[0].slug, "precyzyjny");
        assert_eq!(
            unit.ability(AbilityId(1)).and_then(|a| a.value.clone()),
            Some(TraitValue::Number(1.5))
        );
    }

    #[test]
    fn test_negative_attacks_rejected() {
        let record = WeaponRecord {
            id: WeaponId(1),
            name: "Zepsuty".to_string(),
            range: 12,
            attacks: -1.0,
            ap: 0,
            tags: String::new(),
            default_count: 1,
        };
        assert_eq!(
            record.into_weapon(registry()).unwrap_err(),
            PricingError::NegativeAttacks(-1.0)
        );
    }

    #[test]
    fn test_roster_record_rejects_duplicates() {
        let unit: UnitRecord = ron::from_str(UNIT_RON).expect("valid RON");
        let record = RosterRecord {
            name: "Patrol".to_string(),
            points_limit: None,
            units: vec![unit.clone(), unit],
            entries: Vec::new(),
        };
        assert_eq!(
            record.into_roster(registry()).unwrap_err(),
            PricingError::DuplicateUnit(UnitId(10))
        );
    }

    #[test]
    fn test_entry_loadout_json() {
        let record = RosterEntryRecord {
            unit: UnitId(10),
            models: 3,
            loadout: Some(r#"{"weapons": {"2": 0}, "mode": "total"}"#.to_string()),
            cached_cost: Some(1.0),
        };
        let entry = record.into_entry().expect("valid entry");
        assert_eq!(entry.models, 3);
        assert_eq!(entry.loadout.weapons.get(&WeaponId(2)), Some(&0));
        assert_eq!(entry.cached_cost, Some(1.0));

        let bad = RosterEntryRecord {
            unit: UnitId(10),
            models: 1,
            loadout: Some("[]".to_string()),
            cached_cost: None,
        };
        assert!(matches!(
            bad.into_entry().unwrap_err(),
            PricingError::MalformedLoadout(_)
        ));
    }

    #[test]
    fn test_roster_record_prices() {
        let unit: UnitRecord = ron::from_str(UNIT_RON).expect("valid RON");
        let record = RosterRecord {
            name: "Patrol".to_string(),
            points_limit: Some(100.0),
            units: vec![unit],
            entries: vec![RosterEntryRecord {
                unit: UnitId(10),
                models: 2,
                loadout: None,
                cached_cost: None,
            }],
        };
        let roster = record.into_roster(registry()).expect("valid roster");
        let summary = roster.price(Rulebook::standard()).expect("priced");
        assert_eq!(summary.entries.len(), 1);
        assert!(summary.entries[0].classification.is_some());
        assert!(summary.total > 0.0);
        assert!(!summary.over_limit);
    }
}
