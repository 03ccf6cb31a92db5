// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Serve command - runs the development server with position saving

use super::Workspace;
use crate::bridge::PositionBridge;
use crate::server::{self, AppState};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Run the serve command
pub fn run(workspace: Workspace) -> Result<()> {
    let Workspace {
        config,
        dataset,
        positions,
    } = workspace;

    info!(
        "Loaded {} projects, {} saved positions",
        dataset.len(),
        positions.len()
    );

    let bridge = config.persist_positions.then(|| {
        info!("Saving positions to {}", config.positions_path.display());
        PositionBridge::new(&config.positions_path)
    });
    let state = Arc::new(AppState::new(dataset, positions, bridge));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(server::serve(config.bind, state))
}
