// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Position overlay - merges saved layout coordinates into the project list

use crate::types::{Position, PositionMap, ProjectNode};
use std::collections::HashMap;
use tracing::debug;

/// What a merge did with each position entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayReport {
    /// Entries applied to a node
    pub applied: usize,
    /// Entries whose value was `null`
    pub skipped_null: usize,
    /// Keys that matched no node, in map order
    pub unknown: Vec<String>,
}

/// Merge `positions` into a copy of `nodes`.
///
/// The input list is left untouched.
#[must_use]
pub fn load_graph(nodes: &[ProjectNode], positions: &PositionMap) -> Vec<ProjectNode> {
    let mut merged = nodes.to_vec();
    apply_positions(&mut merged, positions);
    merged
}

/// Overwrite `x`/`y` of every node that has a non-null entry in `positions`.
///
/// Null entries and keys with no matching node are skipped. Never fails.
pub fn apply_positions(nodes: &mut [ProjectNode], positions: &PositionMap) -> OverlayReport {
    let mut report = OverlayReport::default();
    let mut updates: Vec<(usize, Position)> = Vec::with_capacity(positions.len());

    {
        // First occurrence wins if a name is ever duplicated
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            index.entry(node.name.as_str()).or_insert(idx);
        }

        for (name, pos) in positions {
            let Some(pos) = pos else {
                report.skipped_null += 1;
                continue;
            };
            match index.get(name.as_str()) {
                Some(&idx) => updates.push((idx, *pos)),
                None => report.unknown.push(name.clone()),
            }
        }
    }

    for (idx, pos) in updates {
        nodes[idx].set_position(pos);
        report.applied += 1;
    }

    debug!(
        "Applied {} positions ({} null, {} unknown)",
        report.applied,
        report.skipped_null,
        report.unknown.len()
    );
    for name in &report.unknown {
        debug!("No project named {:?}, position ignored", name);
    }

    report
}
