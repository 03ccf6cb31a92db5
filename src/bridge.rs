// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Position persistence bridge
//!
//! The map page sends the whole layout every time a node is dropped:
//!
//! ```json
//! { "type": "custom", "event": "yak-map-pos", "data": { "vue": { "x": 5, "y": 5 } } }
//! ```
//!
//! Messages of any other shape are ignored. A matching message replaces the
//! positions file with `data`, written exactly as received (number formatting
//! and key order preserved).

use crate::error::{Result, YakMapError};
use crate::positions;
use crate::types::PositionMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// `type` of messages the bridge handles
pub const CUSTOM_TYPE: &str = "custom";

/// `event` carrying the full layout
pub const POSITIONS_EVENT: &str = "yak-map-pos";

/// A layout received from the page
#[derive(Debug, Clone, PartialEq)]
pub struct PositionUpdate {
    /// The decoded layout
    pub positions: PositionMap,
    /// The payload as sent, used for writing
    raw: Value,
}

impl PositionUpdate {
    /// The payload as sent
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// Result of handling one message
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeOutcome {
    /// The layout was written to disk
    Persisted(PositionMap),
    /// The message was not a position update
    Ignored,
}

/// Decode a raw channel message.
///
/// Returns `Ok(None)` for anything that is not a position update, and an
/// error when a position update carries a `data` field that is not a
/// name -> position mapping.
pub fn parse_message(raw: &str) -> Result<Option<PositionUpdate>> {
    let Ok(message) = serde_json::from_str::<Value>(raw) else {
        debug!("Ignoring non-JSON message ({} bytes)", raw.len());
        return Ok(None);
    };

    let kind = message.get("type").and_then(Value::as_str);
    let event = message.get("event").and_then(Value::as_str);
    if kind != Some(CUSTOM_TYPE) || event != Some(POSITIONS_EVENT) {
        debug!("Ignoring message type={:?} event={:?}", kind, event);
        return Ok(None);
    }

    let raw = message.get("data").cloned().unwrap_or(Value::Null);
    let positions = PositionMap::deserialize(&raw).map_err(YakMapError::MalformedPayload)?;

    Ok(Some(PositionUpdate { positions, raw }))
}

/// Writes position updates to a fixed file
#[derive(Debug, Clone)]
pub struct PositionBridge {
    path: PathBuf,
}

impl PositionBridge {
    /// Create a bridge writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this bridge writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Handle one raw message, writing the file if it is a position update
    pub fn handle(&self, raw: &str) -> Result<BridgeOutcome> {
        match parse_message(raw)? {
            Some(update) => {
                self.persist(&update)?;
                Ok(BridgeOutcome::Persisted(update.positions))
            }
            None => Ok(BridgeOutcome::Ignored),
        }
    }

    /// Replace the file contents with `update`
    pub fn persist(&self, update: &PositionUpdate) -> Result<()> {
        positions::write(&self.path, &update.raw)?;
        info!(
            "Saved {} positions to {}",
            update.positions.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_position_update() {
        let update = parse_message(
            r#"{"type":"custom","event":"yak-map-pos","data":{"vue":{"x":5,"y":5},"vite":null}}"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(update.positions["vue"], Some(Position::new(5.0, 5.0)));
        assert_eq!(update.positions["vite"], None);
        assert_eq!(update.raw()["vue"]["x"], serde_json::json!(5));
    }

    #[test]
    fn test_other_shapes_are_ignored() {
        let ignored = [
            r#"{"type":"update","event":"yak-map-pos","data":{}}"#,
            r#"{"type":"custom","event":"something-else","data":{}}"#,
            r#"{"event":"yak-map-pos","data":{}}"#,
            r#"{"type":"custom","data":{}}"#,
            r#"{"type":1,"event":"yak-map-pos"}"#,
            r#"["custom","yak-map-pos"]"#,
            "ping",
            "",
        ];
        for raw in ignored {
            assert!(parse_message(raw).unwrap().is_none(), "should ignore {raw:?}");
        }
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let malformed = [
            r#"{"type":"custom","event":"yak-map-pos"}"#,
            r#"{"type":"custom","event":"yak-map-pos","data":[1,2]}"#,
            r#"{"type":"custom","event":"yak-map-pos","data":{"vue":{"x":"5","y":5}}}"#,
            r#"{"type":"custom","event":"yak-map-pos","data":{"vue":{"x":5}}}"#,
        ];
        for raw in malformed {
            let err = parse_message(raw).unwrap_err();
            assert!(matches!(err, YakMapError::MalformedPayload(_)), "{raw:?}");
        }
    }

    #[test]
    fn test_handle_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yak-map-pos.json");
        fs::write(&path, "{\"stale\": null}\n").unwrap();
        let bridge = PositionBridge::new(&path);

        let outcome = bridge
            .handle(r#"{"type":"custom","event":"yak-map-pos","data":{"vue":{"x":5,"y":5}}}"#)
            .unwrap();

        assert!(matches!(outcome, BridgeOutcome::Persisted(ref m) if m.len() == 1));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"vue\": {\n    \"x\": 5,\n    \"y\": 5\n  }\n}\n"
        );
    }

    #[test]
    fn test_handle_ignored_does_not_touch_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yak-map-pos.json");
        let bridge = PositionBridge::new(&path);

        let outcome = bridge
            .handle(r#"{"type":"full-reload","event":"yak-map-pos","data":{"vue":{"x":5,"y":5}}}"#)
            .unwrap();

        assert_eq!(outcome, BridgeOutcome::Ignored);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let bridge = PositionBridge::new(dir.path().join("missing-dir").join("pos.json"));

        let err = bridge
            .handle(r#"{"type":"custom","event":"yak-map-pos","data":{}}"#)
            .unwrap_err();
        assert!(matches!(err, YakMapError::Write { .. }));
    }
}
