// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Check command - validates the dataset against itself and the saved layout

use super::Workspace;
use crate::graph::{DanglingReference, EdgeKind, YakGraph};
use anyhow::Result;
use owo_colors::OwoColorize;

/// Findings of a check run
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Project count
    pub projects: usize,
    /// Resolved `from` edges
    pub inspiration_edges: usize,
    /// Resolved `deps` edges
    pub dependency_edges: usize,
    /// Edge entries naming no project
    pub dangling: Vec<DanglingReference>,
    /// Saved position keys naming no project
    pub unknown_positions: Vec<String>,
    /// Projects the layout has no coordinates for
    pub unpositioned: Vec<String>,
    /// Projects whose coordinates come from the positions file
    pub saved: usize,
    /// Projects nothing else in the map grew out of
    pub roots: Vec<String>,
}

impl CheckReport {
    /// Whether `--strict` should fail
    #[must_use]
    pub fn has_problems(&self) -> bool {
        !self.dangling.is_empty()
    }

    /// Whether anything worth a look was found
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.has_problems() || !self.unknown_positions.is_empty()
    }
}

/// Inspect the workspace
pub fn inspect(workspace: &Workspace) -> Result<CheckReport> {
    let (merged, overlay) = workspace.dataset.clone().with_positions(&workspace.positions);
    let graph = YakGraph::new(merged.all())?;

    Ok(CheckReport {
        projects: graph.node_count(),
        inspiration_edges: graph.edge_count_of(EdgeKind::Inspiration),
        dependency_edges: graph.edge_count_of(EdgeKind::Dependency),
        dangling: graph.dangling_references(),
        unknown_positions: graph
            .unknown_positions(&workspace.positions)
            .into_iter()
            .map(String::from)
            .collect(),
        unpositioned: graph.unpositioned().into_iter().map(|n| n.name.clone()).collect(),
        saved: overlay.applied,
        roots: graph.roots().into_iter().map(|n| n.name.clone()).collect(),
    })
}

/// Run the check command
pub fn run(workspace: &Workspace, strict: bool, color: bool) -> Result<()> {
    let report = inspect(workspace)?;

    let warn = |s: &str| {
        if color {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    };

    println!(
        "{} projects, {} from-edges, {} deps-edges",
        report.projects, report.inspiration_edges, report.dependency_edges
    );
    println!(
        "{} of {} projects have coordinates, {} from the positions file",
        report.projects - report.unpositioned.len(),
        report.projects,
        report.saved
    );
    println!("Roots: {}", report.roots.join(", "));

    if !report.dangling.is_empty() {
        println!();
        println!("{}", warn(&format!("Dangling references ({}):", report.dangling.len())));
        for d in &report.dangling {
            println!("  {} {} -> {} (not in map)", d.node, d.kind, d.missing);
        }
    }

    if !report.unknown_positions.is_empty() {
        println!();
        println!(
            "{}",
            warn(&format!("Saved positions for unknown projects ({}):", report.unknown_positions.len()))
        );
        for name in &report.unknown_positions {
            println!("  {name}");
        }
    }

    if strict && report.has_problems() {
        anyhow::bail!("Check failed: {} dangling references", report.dangling.len());
    }

    if !report.has_warnings() {
        let ok = "OK";
        println!("{}", if color { ok.green().to_string() } else { ok.to_string() });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::dataset::Dataset;
    use crate::types::{Position, PositionMap};

    #[test]
    fn test_builtin_dataset_is_clean() {
        let workspace = Workspace {
            config: Config::default(),
            dataset: Dataset::builtin().unwrap(),
            positions: PositionMap::new(),
        };

        let report = inspect(&workspace).unwrap();

        assert_eq!(report.projects, 75);
        assert!(report.dangling.is_empty(), "{:?}", report.dangling);
        // only the root ships with coordinates
        assert_eq!(report.unpositioned.len(), 74);
        assert_eq!(report.saved, 0);
        assert_eq!(report.roots.len(), 7);
        assert_eq!(report.roots[0], "breadsplit");
        assert!(report.roots.contains(&"taze".to_string()));
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_unknown_positions_reported() {
        let mut positions = PositionMap::new();
        positions.insert("ghost-node".into(), Some(Position::new(1.0, 1.0)));
        let workspace = Workspace {
            config: Config::default(),
            dataset: Dataset::builtin().unwrap(),
            positions,
        };

        let report = inspect(&workspace).unwrap();

        assert_eq!(report.unknown_positions, ["ghost-node"]);
        assert_eq!(report.saved, 0);
        assert!(report.has_warnings());
        assert!(!report.has_problems());
        assert!(run(&workspace, true, false).is_ok());
    }

    #[test]
    fn test_strict_fails_on_dangling_reference() {
        let workspace = Workspace {
            config: Config::default(),
            dataset: Dataset::from_toml_str(
                r#"
                [[primary]]
                name = "vitest"
                link = "https://github.com/vitest-dev/vitest"
                from = ["vite"]
                "#,
                "test",
            )
            .unwrap(),
            positions: PositionMap::new(),
        };

        let report = inspect(&workspace).unwrap();

        assert_eq!(report.dangling.len(), 1);
        assert!(report.has_problems());
        assert!(run(&workspace, true, false).is_err());
        assert!(run(&workspace, false, false).is_ok());
    }

    #[test]
    fn test_saved_counts_only_positions_file() {
        let mut positions = PositionMap::new();
        positions.insert("vue".into(), Some(Position::new(10.0, 20.0)));
        positions.insert("vite".into(), None);
        let workspace = Workspace {
            config: Config::default(),
            dataset: Dataset::builtin().unwrap(),
            positions,
        };

        let report = inspect(&workspace).unwrap();

        assert_eq!(report.saved, 1);
        assert_eq!(report.projects - report.unpositioned.len(), 2);
    }
}
