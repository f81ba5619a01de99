//! Role classification for units that can act as melee or ranged
//! specialists.
//!
//! A dual-role unit is priced twice, once as a warrior and once as a
//! shooter. The classifier picks one label from those two totals and the
//! roles the unit is allowed to carry. Its tie-breaks are part of the
//! pricing contract, so they are encoded step by step.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::math::round_currency;
use crate::registry::TraitRegistry;

/// Mutually exclusive role labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Melee specialist; ranged weapons are discounted.
    Warrior,
    /// Ranged specialist; melee weapons are discounted.
    Shooter,
}

impl Role {
    /// Both roles, warrior first.
    pub const ALL: [Role; 2] = [Role::Warrior, Role::Shooter];

    /// Canonical slug used in trait lists.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Shooter => "shooter",
        }
    }

    /// Human-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Warrior => "Wojownik",
            Self::Shooter => "Strzelec",
        }
    }

    /// The other role.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Warrior => Self::Shooter,
            Self::Shooter => Self::Warrior,
        }
    }

    /// Resolve a name or slug (aliases included) to a role.
    #[must_use]
    pub fn from_slug(registry: &TraitRegistry, name: &str) -> Option<Self> {
        let slug = registry.canonical(name);
        Self::ALL.into_iter().find(|role| role.slug() == slug)
    }

    /// Check whether a trait list carries this role.
    #[must_use]
    pub fn is_in(self, registry: &TraitRegistry, traits: &[String]) -> bool {
        traits
            .iter()
            .any(|t| Self::from_slug(registry, t) == Some(self))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Set of roles a unit may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleSet {
    warrior: bool,
    shooter: bool,
}

impl RoleSet {
    /// Empty set.
    pub const EMPTY: Self = Self {
        warrior: false,
        shooter: false,
    };

    /// Both roles.
    pub const BOTH: Self = Self {
        warrior: true,
        shooter: true,
    };

    /// Add a role.
    pub fn insert(&mut self, role: Role) {
        match role {
            Role::Warrior => self.warrior = true,
            Role::Shooter => self.shooter = true,
        }
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(&self, role: Role) -> bool {
        match role {
            Role::Warrior => self.warrior,
            Role::Shooter => self.shooter,
        }
    }

    /// Number of roles in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.warrior) + usize::from(self.shooter)
    }

    /// Check whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.warrior && !self.shooter
    }

    /// Roles in the set, warrior first.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for role in iter {
            set.insert(role);
        }
        set
    }
}

/// Outcome of classifying a dual-role unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Chosen role.
    pub role: Role,
    /// Display label of the chosen role.
    pub label: String,
    /// Warrior candidate total, rounded for display.
    pub warrior_cost: f64,
    /// Shooter candidate total, rounded for display.
    pub shooter_cost: f64,
}

/// Pick a role from the two role totals and the roles the unit may carry.
///
/// Returns `None` when both totals are non-positive, or when no role is
/// available and the totals tie.
#[must_use]
pub fn classify(
    warrior_total: f64,
    shooter_total: f64,
    available: RoleSet,
) -> Option<Classification> {
    if warrior_total <= 0.0 && shooter_total <= 0.0 {
        return None;
    }

    let preferred = if warrior_total > shooter_total {
        Some(Role::Warrior)
    } else if shooter_total > warrior_total {
        Some(Role::Shooter)
    } else {
        None
    };

    let chosen = if available.is_empty() {
        preferred
    } else {
        match preferred {
            Some(role) if available.contains(role) => Some(role),
            _ if available.len() == 1 => available.iter().next(),
            Some(role) => Some(role.other()).filter(|r| available.contains(*r)),
            None if available.contains(Role::Warrior) => Some(Role::Warrior),
            None => Some(Role::Shooter).filter(|r| available.contains(*r)),
        }
    };

    let chosen = chosen.or_else(|| {
        [Role::Shooter, Role::Warrior]
            .into_iter()
            .find(|r| available.contains(*r))
    })?;

    Some(Classification {
        role: chosen,
        label: chosen.label().to_string(),
        warrior_cost: round_currency(warrior_total),
        shooter_cost: round_currency(shooter_total),
    })
}
