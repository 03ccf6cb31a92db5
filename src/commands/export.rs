// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - writes the merged map in various formats
//!
//! Exports are static artifacts: they read the saved layout but never
//! write it.

use super::Workspace;
use crate::graph::YakGraph;
use crate::positions;
use crate::vis;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// Merged project list as JSON
    Json,
    /// vis-network `{ nodes, edges }` payload
    Vis,
    /// Position file covering every project
    Positions,
}

impl ExportFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Some(Self::Dot),
            "json" => Some(Self::Json),
            "vis" | "vis-network" => Some(Self::Vis),
            "positions" | "pos" => Some(Self::Positions),
            _ => None,
        }
    }

    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Json | Self::Vis | Self::Positions => "json",
        }
    }
}

/// Render the workspace in `format`
pub fn render(workspace: &Workspace, format: ExportFormat) -> Result<String> {
    let all = workspace.merged().all();

    let content = match format {
        ExportFormat::Dot => YakGraph::new(all)?.to_dot(),
        ExportFormat::Json => YakGraph::new(all)?.to_json()?,
        ExportFormat::Vis => serde_json::to_string_pretty(&vis::to_vis(&all))
            .context("Failed to serialize vis payload")?,
        ExportFormat::Positions => positions::to_pretty_string(&positions::snapshot(&all))?,
    };

    Ok(content)
}

/// Run the export command
pub fn run(workspace: &Workspace, format: &str, output: Option<PathBuf>) -> Result<()> {
    info!("Exporting to {}", format);

    let export_format = ExportFormat::parse(format).ok_or_else(|| {
        anyhow::anyhow!("Unknown export format: {}. Supported: dot, json, vis, positions", format)
    })?;

    let mut content = render(workspace, export_format)?;
    if !content.ends_with('\n') {
        content.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported {} to {}", export_format.extension(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
        }
    }

    Ok(())
}
