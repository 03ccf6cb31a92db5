// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use yakmap::dataset::Dataset;
use yakmap::types::PositionMap;

fuzz_target!(|data: &[u8]| {
    if let Ok(positions) = serde_json::from_slice::<PositionMap>(data) {
        let dataset = Dataset::builtin().unwrap();
        let count = dataset.len();
        let (merged, report) = dataset.with_positions(&positions);

        assert_eq!(merged.len(), count);
        assert_eq!(
            report.applied + report.skipped_null + report.unknown.len(),
            positions.len()
        );
    }
});
