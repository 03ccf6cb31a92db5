// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The curated project dataset
//!
//! Projects are declared as plain data in `data/projects.toml`, split into a
//! `primary` list and a `secondary` list of side projects. The built-in copy
//! is embedded in the binary; another file can be loaded with [`Dataset::load`].

use crate::error::{Result, YakMapError};
use crate::overlay::{apply_positions, OverlayReport};
use crate::types::{PositionMap, ProjectNode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_DATASET: &str = include_str!("../data/projects.toml");

/// The primary and secondary project lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Main projects of the map
    #[serde(default)]
    pub primary: Vec<ProjectNode>,
    /// Side projects, rendered faded
    #[serde(default)]
    pub secondary: Vec<ProjectNode>,
}

impl Dataset {
    /// The dataset shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_DATASET, "built-in dataset")
    }

    /// Load a dataset from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| YakMapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Parse a dataset, apply secondary styling and check name uniqueness
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let mut dataset: Self = toml::from_str(content).map_err(|source| YakMapError::Dataset {
            origin: origin.to_string(),
            source,
        })?;
        dataset.normalize();
        dataset.check_unique_names()?;
        debug!(
            "Loaded {} ({} primary, {} secondary)",
            origin,
            dataset.primary.len(),
            dataset.secondary.len()
        );
        Ok(dataset)
    }

    /// Secondary projects are always faded, and only the first one keeps the
    /// default edge animation.
    fn normalize(&mut self) {
        for (idx, project) in self.secondary.iter_mut().enumerate() {
            project.faded = true;
            if idx > 0 {
                project.animate_stop = Some(false);
            }
        }
    }

    fn check_unique_names(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for project in self.iter() {
            if !seen.insert(project.name.as_str()) {
                return Err(YakMapError::DuplicateName(project.name.clone()));
            }
        }
        Ok(())
    }

    /// Iterate over primary then secondary projects
    pub fn iter(&self) -> impl Iterator<Item = &ProjectNode> {
        self.primary.iter().chain(self.secondary.iter())
    }

    /// Primary followed by secondary projects
    #[must_use]
    pub fn all(&self) -> Vec<ProjectNode> {
        self.iter().cloned().collect()
    }

    /// Total project count
    #[must_use]
    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    /// Check if the dataset has no projects
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }

    /// Find a project by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProjectNode> {
        self.iter().find(|p| p.name == name)
    }

    /// Merge saved positions into both lists.
    ///
    /// Both lists are overlaid as one so that position keys are resolved
    /// against every project, then split back at the original boundary.
    #[must_use]
    pub fn with_positions(self, positions: &PositionMap) -> (Self, OverlayReport) {
        let split = self.primary.len();
        let mut all: Vec<ProjectNode> = self.primary.into_iter().chain(self.secondary).collect();
        let report = apply_positions(&mut all, positions);
        let secondary = all.split_off(split);
        (
            Self {
                primary: all,
                secondary,
            },
            report,
        )
    }
}
