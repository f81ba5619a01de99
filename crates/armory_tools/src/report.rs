//! Plain-text roster pricing reports.

use std::fmt::Write;

use armory_core::roster::{CostCategory, RosterSummary, UnitPricing};

const fn category_tag(category: CostCategory) -> &'static str {
    match category {
        CostCategory::Base => "model",
        CostCategory::Weapon => "weapon",
        CostCategory::Ability => "ability",
        CostCategory::Aura => "aura",
        CostCategory::Passive => "passive",
    }
}

fn write_entry(out: &mut String, pricing: &UnitPricing) {
    let role = pricing
        .classification
        .as_ref()
        .map(|c| format!(" [{}: W {:.2} / S {:.2}]", c.label, c.warrior_cost, c.shooter_cost))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{} x{}{}  {:.2} pts",
        pricing.name, pricing.models, role, pricing.total
    );
    for line in &pricing.lines {
        let _ = writeln!(
            out,
            "    {:<8} {:<28} {:>7.2} x{:<3} {:>8.2}",
            category_tag(line.category),
            line.label,
            line.unit_cost,
            line.quantity,
            line.total
        );
    }
}

/// Render a roster summary as an aligned text report.
#[must_use]
pub fn format_summary(summary: &RosterSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Roster: {}", summary.name);
    for entry in &summary.entries {
        write_entry(&mut out, entry);
    }
    let limit = summary
        .points_limit
        .map(|l| format!(" / {l:.2}"))
        .unwrap_or_default();
    let flag = if summary.over_limit { "  OVER LIMIT" } else { "" };
    let _ = writeln!(out, "Total: {:.2}{limit}{flag}", summary.total);
    out
}
