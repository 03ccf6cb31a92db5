// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Invariant tests for the dataset and position overlay
//!
//! These tests verify:
//! 1. Name uniqueness across the full project list
//! 2. Overlay semantics - applied, null and unknown entries
//! 3. Overlay idempotence

use proptest::prelude::*;
use std::collections::HashSet;
use yakmap::dataset::Dataset;
use yakmap::graph::YakGraph;
use yakmap::overlay::{apply_positions, load_graph};
use yakmap::types::{Position, PositionMap, ProjectNode};

// =============================================================================
// Test Helpers
// =============================================================================

fn builtin_all() -> Vec<ProjectNode> {
    Dataset::builtin().unwrap().all()
}

/// Keys drawn from real project names plus a few that match nothing
fn key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "vue", "vite", "nuxt", "vitest", "shiki", "handle", "breadsplit", "nuxt-icon",
        "ghost-node", "not-a-project", "",
    ])
    .prop_map(String::from)
}

fn position_strategy() -> impl Strategy<Value = Option<Position>> {
    prop::option::of((-5000i32..5000, -5000i32..5000).prop_map(|(x, y)| Position::new(f64::from(x), f64::from(y))))
}

fn map_strategy() -> impl Strategy<Value = PositionMap> {
    prop::collection::vec((key_strategy(), position_strategy()), 0..12)
        .prop_map(|entries| entries.into_iter().collect())
}

// =============================================================================
// Dataset Invariants
// =============================================================================

#[test]
fn test_names_unique_across_all() {
    let all = builtin_all();
    let names: HashSet<_> = all.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(names.len(), all.len());
    assert!(YakGraph::new(all).is_ok());
}

#[test]
fn test_all_is_primary_then_secondary() {
    let dataset = Dataset::builtin().unwrap();
    let all = dataset.all();

    assert_eq!(all.len(), dataset.primary.len() + dataset.secondary.len());
    assert_eq!(all[0].name, dataset.primary[0].name);
    assert_eq!(all[dataset.primary.len()].name, dataset.secondary[0].name);
}

#[test]
fn test_secondary_projects_are_faded() {
    let dataset = Dataset::builtin().unwrap();

    assert!(dataset.secondary.iter().all(|p| p.faded));
    assert!(dataset.primary.iter().all(|p| !p.faded));
    assert!(dataset.secondary[1..].iter().all(|p| p.animate_stop == Some(false)));
}

#[test]
fn test_builtin_edges_resolve() {
    let graph = YakGraph::new(builtin_all()).unwrap();
    assert!(graph.dangling_references().is_empty());
}

// =============================================================================
// Overlay Scenarios
// =============================================================================

#[test]
fn test_ghost_node_scenario() {
    let positions: PositionMap = serde_json::from_str(
        r#"{"vue": {"x": 10, "y": 20}, "ghost-node": {"x": 1, "y": 1}}"#,
    )
    .unwrap();
    let nodes = builtin_all();

    let merged = load_graph(&nodes, &positions);

    assert_eq!(merged.len(), nodes.len());
    let vue = merged.iter().find(|p| p.name == "vue").unwrap();
    assert_eq!(vue.x, Some(10.0));
    assert_eq!(vue.y, Some(20.0));
    assert!(merged.iter().all(|p| p.name != "ghost-node"));
}

#[test]
fn test_null_entry_is_not_applied() {
    let positions: PositionMap = serde_json::from_str(r#"{"breadsplit": null, "vite": null}"#).unwrap();
    let mut nodes = builtin_all();

    let report = apply_positions(&mut nodes, &positions);

    assert_eq!(report.skipped_null, 2);
    // dataset-provided coordinates survive a null entry
    let root = nodes.iter().find(|p| p.name == "breadsplit").unwrap();
    assert_eq!(root.position(), Some(Position::new(0.0, 0.0)));
    let vite = nodes.iter().find(|p| p.name == "vite").unwrap();
    assert!(vite.x.is_none() && vite.y.is_none());
}

#[test]
fn test_saved_position_overrides_dataset_position() {
    let positions: PositionMap = serde_json::from_str(r#"{"breadsplit": {"x": -120.5, "y": 33}}"#).unwrap();
    let merged = load_graph(&builtin_all(), &positions);

    assert_eq!(merged[0].position(), Some(Position::new(-120.5, 33.0)));
}

// =============================================================================
// Overlay Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_applied_entries_match(positions in map_strategy()) {
        let merged = load_graph(&builtin_all(), &positions);

        for node in &merged {
            if let Some(Some(pos)) = positions.get(&node.name) {
                prop_assert_eq!(node.position(), Some(*pos));
            }
        }
    }

    #[test]
    fn prop_unlisted_and_null_entries_unchanged(positions in map_strategy()) {
        let before = builtin_all();
        let merged = load_graph(&before, &positions);

        for (old, new) in before.iter().zip(&merged) {
            if !matches!(positions.get(&old.name), Some(Some(_))) {
                prop_assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn prop_unknown_keys_create_nothing(positions in map_strategy()) {
        let before = builtin_all();
        let merged = load_graph(&before, &positions);

        prop_assert_eq!(merged.len(), before.len());
        let names_before: Vec<_> = before.iter().map(|p| &p.name).collect();
        let names_after: Vec<_> = merged.iter().map(|p| &p.name).collect();
        prop_assert_eq!(names_before, names_after);
    }

    #[test]
    fn prop_merge_is_idempotent(positions in map_strategy()) {
        let once = load_graph(&builtin_all(), &positions);
        let twice = load_graph(&once, &positions);

        prop_assert_eq!(once, twice);
    }
}
