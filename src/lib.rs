// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! yak-map library - the yak-shaving map of an open-source ecosystem
//!
//! This crate provides the curated project dataset, the position overlay
//! that merges saved layout coordinates into it, and the development-time
//! bridge that writes dragged positions back to disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bridge;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod overlay;
pub mod positions;
pub mod server;
pub mod vis;

/// Core data types shared by the dataset, overlay and bridge
pub mod types {
    use indexmap::IndexMap;
    use serde::{Deserialize, Serialize};

    // =========================================================================
    // Layout
    // =========================================================================

    /// Position in 2D screen space
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Position {
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
    }

    impl Position {
        /// Create a position from its coordinates
        #[must_use]
        pub fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }
    }

    /// Saved layout keyed by project name.
    ///
    /// A `None` value is a deliberate "no position" entry and is skipped when
    /// the map is merged into the dataset. Key order follows the file.
    pub type PositionMap = IndexMap<String, Option<Position>>;

    // =========================================================================
    // Project Node
    // =========================================================================

    /// One project in the yak-shaving map
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(deny_unknown_fields)]
    pub struct ProjectNode {
        /// Unique name, the join key for positions and edge references
        pub name: String,
        /// Human-readable label (falls back to `name`)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub display: Option<String>,
        /// Project home page
        pub link: String,
        /// Node color (any CSS color)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub color: Option<String>,
        /// Draw the border dashed
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        pub dashed: bool,
        /// Render with reduced opacity
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        pub faded: bool,
        /// Renderer shape name (e.g. `circle`)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub shape: Option<String>,
        /// Label margin in pixels
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub margin: Option<u32>,
        /// Projects this one grew out of
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub from: Vec<String>,
        /// Projects this one actually depends on
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        pub deps: Vec<String>,
        /// Whether edge animation stops at this node
        #[serde(
            default,
            rename = "animateStop",
            alias = "animate_stop",
            skip_serializing_if = "Option::is_none"
        )]
        pub animate_stop: Option<bool>,
        /// Layout X coordinate
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub x: Option<f64>,
        /// Layout Y coordinate
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub y: Option<f64>,
    }

    impl ProjectNode {
        /// Create an unstyled node with no edges
        #[must_use]
        pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                display: None,
                link: link.into(),
                color: None,
                dashed: false,
                faded: false,
                shape: None,
                margin: None,
                from: Vec::new(),
                deps: Vec::new(),
                animate_stop: None,
                x: None,
                y: None,
            }
        }

        /// Label shown in the map
        #[must_use]
        pub fn label(&self) -> &str {
            self.display.as_deref().unwrap_or(&self.name)
        }

        /// Current layout coordinates, if both are set
        #[must_use]
        pub fn position(&self) -> Option<Position> {
            match (self.x, self.y) {
                (Some(x), Some(y)) => Some(Position { x, y }),
                _ => None,
            }
        }

        /// Overwrite the layout coordinates
        pub fn set_position(&mut self, pos: Position) {
            self.x = Some(pos.x);
            self.y = Some(pos.y);
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::dataset::Dataset;
    pub use crate::error::{Result, YakMapError};
    pub use crate::overlay::{apply_positions, load_graph, OverlayReport};
    pub use crate::types::*;
}
