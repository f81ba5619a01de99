//! Roster unit totals, classification and per-item breakdowns.
//!
//! Every call prices from scratch. Per-item costs are summed unrounded and
//! rounded once where a total is returned. The two classification
//! candidates leave the role trait out of the base cost; only the priced
//! breakdown of the chosen role carries it. A roster entry's cached cost is
//! written back by [`Roster::refresh_cached_costs`] and never read here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ability::{ability_cost_raw, AbilityContext, AbilityUse};
use crate::error::{PricingError, Result};
use crate::loadout::LoadoutPayload;
use crate::math::round_currency;
use crate::model::{base_model_cost_raw, RolePricing};
use crate::passive::compute_passive_state;
use crate::role::{classify, Classification, Role};
use crate::rulebook::Rulebook;
use crate::unit::{Unit, UnitId, UnitWeapon};
use crate::weapon::weapon_cost_raw;

fn default_models() -> u32 {
    1
}

/// One entry of a roster: a unit record, a model count and a loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterUnit {
    /// Unit record this entry fields.
    pub unit_id: UnitId,
    /// Number of models.
    #[serde(default = "default_models")]
    pub models: u32,
    /// Wargear and ability selection.
    #[serde(default)]
    pub loadout: LoadoutPayload,
    /// Last computed cost. Write-through only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_cost: Option<f64>,
}

impl RosterUnit {
    /// Create an entry with the unit's default loadout.
    #[must_use]
    pub fn new(unit_id: UnitId, models: u32) -> Self {
        Self {
            unit_id,
            models,
            loadout: LoadoutPayload::default(),
            cached_cost: None,
        }
    }

    /// Builder method to set the loadout.
    #[must_use]
    pub fn with_loadout(mut self, loadout: LoadoutPayload) -> Self {
        self.loadout = loadout;
        self
    }
}

/// Totals of a roster entry fielded as each role.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleTotals {
    /// Total as a warrior.
    pub warrior: f64,
    /// Total as a shooter.
    pub shooter: f64,
}

/// Kind of item a breakdown line prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostCategory {
    /// Model stat block and defense traits.
    Base,
    /// Weapon.
    Weapon,
    /// Individually activated ability.
    Ability,
    /// Aura/order ability.
    Aura,
    /// Passive trait priced as an ability.
    Passive,
}

/// One row of a unit's cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    /// Display label.
    pub label: String,
    /// Item kind.
    pub category: CostCategory,
    /// Cost of one item, rounded for display.
    pub unit_cost: f64,
    /// Number of items.
    pub quantity: u32,
    /// Line total, rounded for display.
    pub total: f64,
}

/// Priced roster entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitPricing {
    /// Unit record id.
    pub unit_id: UnitId,
    /// Unit display name.
    pub name: String,
    /// Number of models.
    pub models: u32,
    /// Point cost of the entry.
    pub total: f64,
    /// Role classification, for dual-role units.
    pub classification: Option<Classification>,
    /// Per-item breakdown.
    pub lines: Vec<CostLine>,
}

#[derive(Debug, Default)]
struct Breakdown {
    raw_total: f64,
    lines: Vec<CostLine>,
}

impl Breakdown {
    fn push(&mut self, label: &str, category: CostCategory, unit_cost: f64, quantity: u32) {
        let total = unit_cost * f64::from(quantity);
        self.raw_total += total;
        self.lines.push(CostLine {
            label: label.to_string(),
            category,
            unit_cost: round_currency(unit_cost),
            quantity,
            total: round_currency(total),
        });
    }
}

/// Weapons selected by a loadout, with resolved quantities.
///
/// Weapons missing from the loadout keep their default per-model count; a
/// count of zero removes the weapon.
#[must_use]
pub fn resolved_weapons<'u>(
    unit: &'u Unit,
    loadout: &LoadoutPayload,
    models: u32,
) -> Vec<(&'u UnitWeapon, u32)> {
    for id in loadout.weapons.keys() {
        if unit.weapon(*id).is_none() {
            debug!(unit = %unit.id, weapon = id.0, "Loadout weapon not on unit, ignored");
        }
    }

    unit.weapons
        .iter()
        .filter_map(|w| {
            let quantity = match loadout.weapons.get(&w.id) {
                Some(&count) => loadout.mode.quantity(count, models),
                None => w.default_count.saturating_mul(models),
            };
            (quantity > 0).then_some((w, quantity))
        })
        .collect()
}

/// Check whether a roster entry may be classified as warrior or shooter.
///
/// Eligible units declare a role in their flags, or field both a melee
/// and a ranged capable weapon.
#[must_use]
pub fn is_dual_role_eligible(
    rules: &Rulebook,
    unit: &Unit,
    loadout: &LoadoutPayload,
    models: u32,
) -> bool {
    let registry = &rules.registry;
    if !unit.available_roles(registry).is_empty() {
        return true;
    }
    let selected = resolved_weapons(unit, loadout, models);
    let (ranged, melee) = Unit::attack_modes(registry, selected.iter().map(|(w, _)| &w.weapon));
    ranged && melee
}

fn price_with_role(
    rules: &Rulebook,
    unit: &Unit,
    models: u32,
    loadout: &LoadoutPayload,
    role: Option<Role>,
    roles: RolePricing,
) -> Breakdown {
    let registry = &rules.registry;
    let state = compute_passive_state(registry, unit, Some(loadout), role);
    let mut breakdown = Breakdown::default();

    let base = base_model_cost_raw(rules, &unit.stats, &state.traits, roles);
    breakdown.push(&unit.name, CostCategory::Base, base, models);

    for (w, quantity) in resolved_weapons(unit, loadout, models) {
        let cost = weapon_cost_raw(rules, &w.weapon, unit.stats.quality, &state.traits);
        breakdown.push(w.weapon.name(), CostCategory::Weapon, cost, quantity);
    }

    let context = |usage| AbilityContext {
        traits: &state.traits,
        toughness: Some(unit.stats.toughness),
        defense: Some(unit.stats.defense),
        usage,
    };

    for (usage, category, counts) in [
        (AbilityUse::Individual, CostCategory::Ability, &loadout.active),
        (AbilityUse::Aura, CostCategory::Aura, &loadout.aura),
    ] {
        for (&id, &count) in counts {
            let Some(link) = unit.ability(id) else {
                debug!(unit = %unit.id, ability = id.0, "Loadout ability not on unit, ignored");
                continue;
            };
            let quantity = loadout.mode.quantity(count, models);
            if quantity == 0 {
                continue;
            }
            let cost = ability_cost_raw(rules, &link.slug, link.value.as_ref(), &context(usage));
            breakdown.push(&link.name, category, cost, quantity);
        }
    }

    for entry in state.priced_entries(registry) {
        let cost = ability_cost_raw(
            rules,
            &entry.slug,
            entry.value.as_ref(),
            &context(AbilityUse::Individual),
        );
        if cost != 0.0 {
            breakdown.push(&entry.label, CostCategory::Passive, cost, models);
        }
    }

    trace!(unit = %unit.id, ?role, total = breakdown.raw_total, "Priced roster unit");
    breakdown
}

/// Totals of a roster entry priced as a warrior and as a shooter.
///
/// Each total applies the role's weapon discounts but not the role's own
/// base-cost delta. `loadout` overrides the entry's own loadout. Units
/// that are not dual-role eligible get `(0, 0)`.
#[must_use]
pub fn roster_unit_role_totals(
    rules: &Rulebook,
    unit: &Unit,
    entry: &RosterUnit,
    loadout: Option<&LoadoutPayload>,
) -> RoleTotals {
    let loadout = loadout.unwrap_or(&entry.loadout);
    if !is_dual_role_eligible(rules, unit, loadout, entry.models) {
        return RoleTotals::default();
    }
    let total = |role| {
        let candidate = price_with_role(
            rules,
            unit,
            entry.models,
            loadout,
            Some(role),
            RolePricing::Exclude,
        );
        round_currency(candidate.raw_total)
    };
    RoleTotals {
        warrior: total(Role::Warrior),
        shooter: total(Role::Shooter),
    }
}

/// Price a roster entry with its classification and breakdown.
#[must_use]
pub fn price_roster_unit(rules: &Rulebook, unit: &Unit, entry: &RosterUnit) -> UnitPricing {
    let totals = roster_unit_role_totals(rules, unit, entry, None);
    let classification = classify(
        totals.warrior,
        totals.shooter,
        unit.available_roles(&rules.registry),
    );
    let role = classification.as_ref().map(|c| c.role);
    let breakdown = price_with_role(
        rules,
        unit,
        entry.models,
        &entry.loadout,
        role,
        RolePricing::Include,
    );

    UnitPricing {
        unit_id: unit.id,
        name: unit.name.clone(),
        models: entry.models,
        total: round_currency(breakdown.raw_total),
        classification,
        lines: breakdown.lines,
    }
}

/// Point cost of a roster entry.
#[must_use]
pub fn roster_unit_cost(rules: &Rulebook, unit: &Unit, entry: &RosterUnit) -> f64 {
    price_roster_unit(rules, unit, entry).total
}

/// Point-limited army list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roster {
    /// Display name.
    pub name: String,
    /// Maximum total points, if any.
    pub points_limit: Option<f64>,
    /// Unit records available to entries.
    pub units: BTreeMap<UnitId, Unit>,
    /// Fielded entries, in list order.
    pub entries: Vec<RosterUnit>,
}

/// Priced roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterSummary {
    /// Roster name.
    pub name: String,
    /// Sum of entry totals.
    pub total: f64,
    /// Maximum total points, if any.
    pub points_limit: Option<f64>,
    /// Whether the total exceeds the limit.
    pub over_limit: bool,
    /// Per-entry pricing, in list order.
    pub entries: Vec<UnitPricing>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new(name: impl Into<String>, points_limit: Option<f64>) -> Self {
        Self {
            name: name.into(),
            points_limit,
            units: BTreeMap::new(),
            entries: Vec::new(),
        }
    }

    /// Register a unit record.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::DuplicateUnit`] if the id is taken.
    pub fn add_unit(&mut self, unit: Unit) -> Result<()> {
        if self.units.contains_key(&unit.id) {
            return Err(PricingError::DuplicateUnit(unit.id));
        }
        self.units.insert(unit.id, unit);
        Ok(())
    }

    /// Append an entry.
    pub fn add_entry(&mut self, entry: RosterUnit) {
        self.entries.push(entry);
    }

    /// Look up a unit record.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownUnit`] if no record has the id.
    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(&id).ok_or(PricingError::UnknownUnit(id))
    }

    /// Price one entry against this roster's unit records.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownUnit`] if the entry's unit is missing.
    pub fn price_entry(&self, rules: &Rulebook, entry: &RosterUnit) -> Result<UnitPricing> {
        let unit = self.unit(entry.unit_id)?;
        Ok(price_roster_unit(rules, unit, entry))
    }

    /// Price every entry.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownUnit`] if any entry's unit is missing.
    pub fn price(&self, rules: &Rulebook) -> Result<RosterSummary> {
        let entries = self
            .entries
            .iter()
            .map(|entry| self.price_entry(rules, entry))
            .collect::<Result<Vec<_>>>()?;

        let total = round_currency(entries.iter().map(|e| e.total).sum());
        let over_limit = self.points_limit.is_some_and(|limit| total > limit);
        debug!(roster = %self.name, total, over_limit, "Priced roster");

        Ok(RosterSummary {
            name: self.name.clone(),
            total,
            points_limit: self.points_limit,
            over_limit,
            entries,
        })
    }

    /// Recompute every entry and store the result in its cached cost.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownUnit`] if any entry's unit is missing.
    /// No cached cost is changed in that case.
    pub fn refresh_cached_costs(&mut self, rules: &Rulebook) -> Result<()> {
        let summary = self.price(rules)?;
        for (entry, priced) in self.entries.iter_mut().zip(summary.entries) {
            entry.cached_cost = Some(priced.total);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loadout::QuantityMode;
    use crate::parse::{parse_flags, parse_weapon_tags};
    use crate::traits::TraitValue;
    use crate::unit::{AbilityId, AbilityLink, StatBlock, WeaponId};
    use crate::weapon::Weapon;

    fn rules() -> &'static Rulebook {
        Rulebook::standard()
    }

    fn rifle(attacks: f64) -> Weapon {
        Weapon::new("Karabin", 24, attacks, 0).expect("weapon")
    }

    fn blade() -> Weapon {
        Weapon::new("Ostrze", 0, 2.0, 1).expect("weapon")
    }

    fn trooper(flags: &str) -> Unit {
        Unit::new(UnitId(1), "Piechota", StatBlock::new(4, 4, 1))
            .with_passives(parse_flags(flags, &rules().registry))
    }

    fn dual(flags: &str) -> Unit {
        trooper(flags)
            .with_weapon(WeaponId(1), rifle(2.0), 1)
            .with_weapon(WeaponId(2), blade(), 1)
    }

    #[test]
    fn test_single_model_regression_pin() {
        let unit = Unit::new(UnitId(1), "Weteran", StatBlock::new(4, 4, 6))
            .with_weapon(WeaponId(1), rifle(1.0), 1);
        let entry = RosterUnit::new(UnitId(1), 1);

        let pricing = price_roster_unit(rules(), &unit, &entry);
        assert_eq!(pricing.total, 26.25);
        assert_eq!(pricing.classification, None);
        assert_eq!(pricing.lines.len(), 2);
        assert_eq!(pricing.lines[0].category, CostCategory::Base);
        assert_eq!(pricing.lines[0].total, 25.0);
        assert_eq!(pricing.lines[1].category, CostCategory::Weapon);
        assert_eq!(pricing.lines[1].total, 1.25);

        let entry = RosterUnit::new(UnitId(1), 5);
        assert_eq!(roster_unit_cost(rules(), &unit, &entry), 131.25);
    }

    #[test]
    fn test_ineligible_unit_has_zero_role_totals() {
        let unit = trooper("").with_weapon(WeaponId(1), rifle(1.0), 1);
        let entry = RosterUnit::new(UnitId(1), 1);
        assert_eq!(
            roster_unit_role_totals(rules(), &unit, &entry, None),
            RoleTotals::default()
        );
    }

    #[test]
    fn test_mixed_loadout_is_classified() {
        let unit = dual("");
        let entry = RosterUnit::new(UnitId(1), 1);

        let totals = roster_unit_role_totals(rules(), &unit, &entry, None);
        // warrior: 17.5 base + 1.25 rifle (discounted) + 2.4 blade
        assert_eq!(totals.warrior, 21.15);
        // shooter: 17.5 base + 2.5 rifle + 1.2 blade (discounted)
        assert_eq!(totals.shooter, 21.2);

        let pricing = price_roster_unit(rules(), &unit, &entry);
        let classification = pricing.classification.expect("classified");
        assert_eq!(classification.role, Role::Shooter);
        assert_eq!(classification.label, "Strzelec");
        assert_eq!(classification.warrior_cost, 21.15);
        assert_eq!(classification.shooter_cost, 21.2);
        // chosen role adds its base delta: 17.25 + 2.5 + 1.2
        assert_eq!(pricing.total, 20.95);
        assert_eq!(pricing.lines[0].total, 17.25);
    }

    #[test]
    fn test_role_pool_restricts_classification() {
        let unit = dual("Wojownik?");
        let pricing = price_roster_unit(rules(), &unit, &RosterUnit::new(UnitId(1), 1));
        let classification = pricing.classification.expect("classified");
        assert_eq!(classification.role, Role::Warrior);
        assert_eq!(classification.shooter_cost, 21.2);
        // 18.0 base + 1.25 rifle (discounted) + 2.4 blade
        assert_eq!(pricing.total, 21.65);
    }

    #[test]
    fn test_declared_role_makes_unit_eligible() {
        let unit = trooper("Wojownik?").with_weapon(WeaponId(1), rifle(2.0), 1);
        let entry = RosterUnit::new(UnitId(1), 1);

        let totals = roster_unit_role_totals(rules(), &unit, &entry, None);
        assert_eq!(totals.warrior, 18.75);
        assert_eq!(totals.shooter, 20.0);

        let pricing = price_roster_unit(rules(), &unit, &entry);
        assert_eq!(pricing.classification.map(|c| c.role), Some(Role::Warrior));
        assert_eq!(pricing.total, 19.25);
    }

    #[test]
    fn test_loadout_override_changes_eligibility() {
        let unit = dual("");
        let entry = RosterUnit::new(UnitId(1), 1);
        let no_blade = LoadoutPayload::default().with_weapon(WeaponId(2), 0);
        assert_eq!(
            roster_unit_role_totals(rules(), &unit, &entry, Some(&no_blade)),
            RoleTotals::default()
        );
    }

    #[test]
    fn test_assault_weapon_alone_is_eligible() {
        let carbine = Weapon::new("Karabinek", 12, 1.0, 0)
            .expect("weapon")
            .with_traits(parse_weapon_tags("Szturmowy", &rules().registry));
        let unit = trooper("").with_weapon(WeaponId(1), carbine, 1);
        assert!(is_dual_role_eligible(
            rules(),
            &unit,
            &LoadoutPayload::default(),
            1
        ));
    }

    #[test]
    fn test_quantity_modes() {
        let unit = trooper("").with_weapon(WeaponId(1), rifle(1.0), 1);
        let loadout = LoadoutPayload::default().with_weapon(WeaponId(1), 2);

        let per_model = RosterUnit::new(UnitId(1), 3).with_loadout(loadout.clone());
        assert_eq!(roster_unit_cost(rules(), &unit, &per_model), 60.0);

        let total =
            RosterUnit::new(UnitId(1), 3).with_loadout(loadout.with_mode(QuantityMode::Total));
        assert_eq!(roster_unit_cost(rules(), &unit, &total), 55.0);
    }

    #[test]
    fn test_zero_count_removes_weapon() {
        let unit = trooper("").with_weapon(WeaponId(1), rifle(1.0), 1);
        let entry = RosterUnit::new(UnitId(1), 3)
            .with_loadout(LoadoutPayload::default().with_weapon(WeaponId(1), 0));
        let pricing = price_roster_unit(rules(), &unit, &entry);
        assert_eq!(pricing.total, 52.5);
        assert!(pricing.lines.iter().all(|l| l.category != CostCategory::Weapon));
    }

    #[test]
    fn test_active_and_aura_abilities() {
        let registry = &rules().registry;
        let unit = trooper("")
            .with_ability(AbilityLink::new(AbilityId(1), "Zwiadowca", registry))
            .with_ability(AbilityLink::new(AbilityId(2), "Nieustraszony", registry));
        let loadout = LoadoutPayload::default()
            .with_active(AbilityId(1), 1)
            .with_aura(AbilityId(2), 1)
            .with_active(AbilityId(99), 4);
        let entry = RosterUnit::new(UnitId(1), 2).with_loadout(loadout);

        let pricing = price_roster_unit(rules(), &unit, &entry);
        // 2 × 17.5 base + 2 × 2.0 scout + 2 × 3.0 fearless aura
        assert_eq!(pricing.total, 45.0);
        assert!(pricing.lines.iter().any(|l| l.category == CostCategory::Aura && l.total == 6.0));
    }

    #[test]
    fn test_per_value_ability_link() {
        let registry = &rules().registry;
        let unit = trooper("").with_ability(
            AbilityLink::new(AbilityId(1), "Strach", registry).with_value(TraitValue::Number(2.0)),
        );
        let entry = RosterUnit::new(UnitId(1), 1)
            .with_loadout(LoadoutPayload::default().with_active(AbilityId(1), 1));
        assert_eq!(roster_unit_cost(rules(), &unit, &entry), 20.0);
    }

    #[test]
    fn test_passives_priced_per_model() {
        let unit = trooper("Nieustraszony, Okopany");
        let entry = RosterUnit::new(UnitId(1), 2);
        let pricing = price_roster_unit(rules(), &unit, &entry);
        // 2 × (17.5 + 2.0 dug in) + 2 × 1.5 fearless; dug in is already in base
        assert_eq!(pricing.total, 42.0);
        let passive: Vec<_> = pricing
            .lines
            .iter()
            .filter(|l| l.category == CostCategory::Passive)
            .map(|l| l.label.as_str())
            .collect();
        assert_eq!(passive, vec!["Nieustraszony"]);

        let entry = entry.with_loadout(LoadoutPayload::default().with_passive("okopany", false));
        assert_eq!(roster_unit_cost(rules(), &unit, &entry), 38.0);
    }

    #[test]
    fn test_repeated_passive_priced_once() {
        let unit = trooper("Nieustraszony, Nieustraszony");
        let pricing = price_roster_unit(rules(), &unit, &RosterUnit::new(UnitId(1), 1));
        // 17.5 base + 1.5 fearless
        assert_eq!(pricing.total, 19.0);
        let passives = pricing
            .lines
            .iter()
            .filter(|l| l.category == CostCategory::Passive)
            .count();
        assert_eq!(passives, 1);
    }

    #[test]
    fn test_roster_price_and_limit() {
        let mut roster = Roster::new("Patrol", Some(50.0));
        roster
            .add_unit(trooper("").with_weapon(WeaponId(1), rifle(1.0), 1))
            .expect("unit");
        roster.add_entry(RosterUnit::new(UnitId(1), 2));
        roster.add_entry(RosterUnit::new(UnitId(1), 1));

        let summary = roster.price(rules()).expect("priced");
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.total, 56.25);
        assert!(summary.over_limit);

        roster.points_limit = None;
        assert!(!roster.price(rules()).expect("priced").over_limit);
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        let mut roster = Roster::new("Patrol", None);
        roster.add_entry(RosterUnit::new(UnitId(5), 1));
        assert_eq!(
            roster.price(rules()).unwrap_err(),
            PricingError::UnknownUnit(UnitId(5))
        );
    }

    #[test]
    fn test_duplicate_unit_is_rejected() {
        let mut roster = Roster::new("Patrol", None);
        roster.add_unit(trooper("")).expect("first");
        assert_eq!(
            roster.add_unit(trooper("")).unwrap_err(),
            PricingError::DuplicateUnit(UnitId(1))
        );
    }

    #[test]
    fn test_cached_cost_is_write_through() {
        let mut roster = Roster::new("Patrol", None);
        roster
            .add_unit(trooper("").with_weapon(WeaponId(1), rifle(1.0), 1))
            .expect("unit");
        let mut entry = RosterUnit::new(UnitId(1), 1);
        entry.cached_cost = Some(999.0);
        roster.add_entry(entry);

        assert_eq!(roster.price(rules()).expect("priced").total, 18.75);
        roster.refresh_cached_costs(rules()).expect("refreshed");
        assert_eq!(roster.entries[0].cached_cost, Some(18.75));
    }
}
