//! Effective passive trait state of a roster entry.
//!
//! The state is rebuilt from scratch on every call: unit defaults, then
//! loadout overrides, then the role label. Nothing is patched in place, so
//! a role computed for an older loadout cannot linger.

use serde::{Deserialize, Serialize};

use crate::loadout::LoadoutPayload;
use crate::registry::TraitRegistry;
use crate::role::Role;
use crate::traits::PassiveTraitEntry;
use crate::unit::Unit;

/// One passive entry together with its resolved on/off state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveStateEntry {
    /// Entry as declared on the unit.
    pub entry: PassiveTraitEntry,
    /// Whether the entry is active for this roster entry.
    pub enabled: bool,
}

/// Resolved passive traits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PassiveState {
    /// Canonical slugs of enabled traits. At most one role slug, always
    /// last.
    pub traits: Vec<String>,
    /// Every declared non-role entry with its on/off state.
    pub payload: Vec<PassiveStateEntry>,
}

impl PassiveState {
    /// Replace any role slug with `role` (or drop it for `None`).
    ///
    /// Applying a role twice, or two different roles in a row, leaves
    /// exactly the last one.
    #[must_use]
    pub fn with_role(mut self, registry: &TraitRegistry, role: Option<Role>) -> Self {
        self.traits
            .retain(|slug| Role::from_slug(registry, slug).is_none());
        if let Some(role) = role {
            self.traits.push(role.slug().to_string());
        }
        self
    }

    /// Role slug currently carried, if any.
    #[must_use]
    pub fn role(&self, registry: &TraitRegistry) -> Option<Role> {
        self.traits
            .iter()
            .find_map(|slug| Role::from_slug(registry, slug))
    }

    /// Enabled entries that are priced as abilities: not hidden and not
    /// role labels.
    pub fn priced_entries<'a>(
        &'a self,
        registry: &'a TraitRegistry,
    ) -> impl Iterator<Item = &'a PassiveTraitEntry> + 'a {
        self.payload
            .iter()
            .filter(|e| e.enabled)
            .map(|e| &e.entry)
            .filter(move |e| !registry.is_hidden(&e.slug))
    }
}

/// Merge a unit's declared passives with loadout overrides and a role.
///
/// Mandatory entries stay on whatever the loadout says. A slug declared
/// twice keeps its first entry only. Role entries
/// declared by the unit only mark availability; they never enter the
/// trait list directly. `role` is injected at the end.
#[must_use]
pub fn compute_passive_state(
    registry: &TraitRegistry,
    unit: &Unit,
    loadout: Option<&LoadoutPayload>,
    role: Option<Role>,
) -> PassiveState {
    let mut state = PassiveState::default();

    for entry in &unit.passives {
        if Role::from_slug(registry, &entry.slug).is_some()
            || state.payload.iter().any(|p| p.entry.slug == entry.slug)
        {
            continue;
        }

        let enabled = if entry.is_mandatory {
            true
        } else {
            loadout
                .and_then(|l| l.passive_override(registry, &entry.slug))
                .unwrap_or(entry.is_default)
        };

        if enabled {
            state.traits.push(entry.slug.clone());
        }
        state.payload.push(PassiveStateEntry {
            entry: entry.clone(),
            enabled,
        });
    }

    state.with_role(registry, role)
}
