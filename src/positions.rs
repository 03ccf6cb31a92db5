// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! The saved positions file
//!
//! A JSON object mapping project name to `{"x": .., "y": ..}` or `null`.
//! It is read once when the map is loaded and rewritten wholesale by the
//! bridge. Writes are a plain overwrite with no temp file or backup.

use crate::error::{Result, YakMapError};
use crate::types::{PositionMap, ProjectNode};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// File name used when no path is configured
pub const DEFAULT_POSITIONS_FILE: &str = "yak-map-pos.json";

/// Read the positions file.
///
/// A missing file is an empty layout, not an error.
pub fn read(path: &Path) -> Result<PositionMap> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No positions file at {}, starting with an empty layout", path.display());
            return Ok(PositionMap::new());
        }
        Err(source) => {
            return Err(YakMapError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&content).map_err(|source| YakMapError::Positions {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a value the way the positions file stores it: two-space indented
/// JSON with a trailing newline.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut out = serde_json::to_string_pretty(value).map_err(YakMapError::Serialize)?;
    out.push('\n');
    Ok(out)
}

/// Replace the contents of the positions file
pub fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = to_pretty_string(value)?;
    fs::write(path, content).map_err(|source| YakMapError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Snapshot the coordinates currently set on `nodes`.
///
/// Nodes without a position are recorded as `null` so the file lists every
/// project.
#[must_use]
pub fn snapshot(nodes: &[ProjectNode]) -> PositionMap {
    nodes
        .iter()
        .map(|n| (n.name.clone(), n.position()))
        .collect()
}
