// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for the yak-map library

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the map or persisting positions
#[derive(Debug, Error)]
pub enum YakMapError {
    /// The dataset TOML could not be parsed
    #[error("failed to parse dataset {origin}: {source}")]
    Dataset {
        /// Where the dataset came from (file path or "built-in dataset")
        origin: String,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },

    /// Two projects share a name
    #[error("duplicate project name: {0}")]
    DuplicateName(String),

    /// A file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The positions file is not a name -> position mapping
    #[error("failed to parse positions in {}: {source}", path.display())]
    Positions {
        /// File path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A file could not be written
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A position update message carried an unusable payload
    #[error("malformed position payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// Serialization to JSON failed
    #[error("failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The blocking position writer did not finish
    #[error("position writer task failed: {0}")]
    Writer(#[from] tokio::task::JoinError),

    /// Configuration could not be assembled
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, YakMapError>;
