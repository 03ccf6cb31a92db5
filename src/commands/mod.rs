// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod check;
pub mod completions;
pub mod export;
pub mod serve;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::positions;
use crate::types::PositionMap;
use anyhow::{Context, Result};

/// Dataset and saved layout as selected by the configuration
pub struct Workspace {
    /// Effective configuration
    pub config: Config,
    /// Dataset without positions
    pub dataset: Dataset,
    /// Saved layout
    pub positions: PositionMap,
}

impl Workspace {
    /// Load the configured dataset and positions file
    pub fn load(config: Config) -> Result<Self> {
        let dataset = match &config.dataset_path {
            Some(path) => Dataset::load(path)
                .with_context(|| format!("Failed to load dataset {}", path.display()))?,
            None => Dataset::builtin().context("Failed to load built-in dataset")?,
        };

        let positions = positions::read(&config.positions_path).with_context(|| {
            format!("Failed to load positions from {}", config.positions_path.display())
        })?;

        Ok(Self {
            config,
            dataset,
            positions,
        })
    }

    /// Dataset with the saved layout applied
    #[must_use]
    pub fn merged(&self) -> Dataset {
        let (merged, report) = self.dataset.clone().with_positions(&self.positions);
        if !report.unknown.is_empty() {
            tracing::debug!("{} saved positions name no project", report.unknown.len());
        }
        merged
    }
}
