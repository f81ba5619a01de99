//! Loads and prices the bundled sample roster.

use std::path::{Path, PathBuf};

use armory_core::role::Role;
use armory_core::rulebook::Rulebook;
use armory_test_utils::fixtures::assert_cost_eq;
use armory_tools::{loader, report, validate};

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/rosters/sample.ron")
}

#[test]
fn test_sample_roster_prices() {
    let rules = Rulebook::standard();
    let roster = loader::load_roster(&sample_path(), rules).expect("sample roster loads");
    let summary = roster.price(rules).expect("sample roster prices");

    let totals: Vec<f64> = summary.entries.iter().map(|e| e.total).collect();
    assert_eq!(totals, vec![26.25, 114.75, 130.5]);
    assert_cost_eq(summary.total, 271.5);
    assert!(!summary.over_limit);

    let assault = &summary.entries[1];
    let classification = assault.classification.as_ref().expect("dual-role entry");
    assert_eq!(classification.role, Role::Shooter);
    assert_eq!(classification.warrior_cost, 115.75);
    assert_eq!(classification.shooter_cost, 116.0);

    assert!(summary.entries[0].classification.is_none());
    assert!(summary.entries[2].classification.is_none());
}

#[test]
fn test_sample_roster_validates() {
    let issues = validate::validate_roster_file(&sample_path(), Rulebook::standard())
        .expect("sample roster loads");
    assert!(issues.is_empty(), "{issues:?}");
}

#[test]
fn test_sample_report_mentions_every_unit() {
    let rules = Rulebook::standard();
    let summary = loader::load_roster(&sample_path(), rules)
        .and_then(|r| Ok(r.price(rules)?))
        .expect("sample roster prices");
    let text = report::format_summary(&summary);
    for name in ["Weteran", "Szturmowcy", "Rekruci", "Total: 271.50 / 300.00"] {
        assert!(text.contains(name), "missing {name} in:\n{text}");
    }
}

#[test]
fn test_refresh_writes_cached_costs() {
    let rules = Rulebook::standard();
    let mut roster = loader::load_roster(&sample_path(), rules).expect("sample roster loads");
    roster.refresh_cached_costs(rules).expect("refreshed");
    let cached: Vec<Option<f64>> = roster.entries.iter().map(|e| e.cached_cost).collect();
    assert_eq!(cached, vec![Some(26.25), Some(114.75), Some(130.5)]);
}
