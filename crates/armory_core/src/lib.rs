//! # Armory Core
//!
//! Point-cost rules engine for the armory roster tool.
//!
//! This crate contains **only** pure pricing logic:
//! - No IO
//! - No global mutable state
//! - No panics on unknown game content
//!
//! Unknown traits, abilities and table gaps degrade to zero-effect
//! defaults. Every calculator takes the [`Rulebook`](rulebook::Rulebook)
//! it prices against, so callers and tests can swap balance data freely.
//!
//! ## Crate Structure
//!
//! - [`tables`] - Banded modifier tables with nearest-key lookup
//! - [`registry`] - Named weapon traits, abilities and defense rows
//! - [`rulebook`] - Versioned tables plus registry, loadable from RON
//! - [`weapon`] - Weapon cost calculator
//! - [`model`] - Base model cost calculator
//! - [`ability`] - Ability cost calculator
//! - [`passive`] - Passive state resolver
//! - [`role`] - Warrior/shooter classifier
//! - [`roster`] - Roster unit totals and breakdowns
//! - [`parse`] - Flag and tag mini-parser for stored strings
//! - [`data`] - Standard rulebook and stored record shapes

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ability;
pub mod data;
pub mod error;
pub mod loadout;
pub mod math;
pub mod model;
pub mod parse;
pub mod passive;
pub mod registry;
pub mod role;
pub mod roster;
pub mod rulebook;
pub mod slug;
pub mod tables;
pub mod traits;
pub mod unit;
pub mod weapon;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ability::{ability_cost, ability_cost_from_name, AbilityContext, AbilityUse};
    pub use crate::data::{AbilityRecord, RosterEntryRecord, RosterRecord, UnitRecord, WeaponRecord};
    pub use crate::error::{PricingError, Result};
    pub use crate::loadout::{LoadoutPayload, QuantityMode};
    pub use crate::model::{base_model_cost, role_agnostic_base_cost};
    pub use crate::parse::{parse_flags, parse_weapon_tags};
    pub use crate::passive::{compute_passive_state, PassiveState};
    pub use crate::registry::{AbilityRule, TraitRegistry, WeaponTraitRule};
    pub use crate::role::{classify, Classification, Role, RoleSet};
    pub use crate::roster::{
        price_roster_unit, roster_unit_cost, roster_unit_role_totals, CostCategory, CostLine,
        RoleTotals, Roster, RosterSummary, RosterUnit, UnitPricing,
    };
    pub use crate::rulebook::Rulebook;
    pub use crate::tables::{ModifierTable, RulesTables};
    pub use crate::traits::{PassiveTraitEntry, TraitValue, WeaponTrait};
    pub use crate::unit::{AbilityId, AbilityLink, StatBlock, Unit, UnitId, WeaponId};
    pub use crate::weapon::{weapon_components, weapon_cost, AttackMode, Weapon};
}
