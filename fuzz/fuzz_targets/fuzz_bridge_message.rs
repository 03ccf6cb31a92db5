// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
#![no_main]

use libfuzzer_sys::fuzz_target;
use yakmap::bridge::parse_message;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Ok(Some(update)) = parse_message(raw) {
            // whatever was accepted must be writable
            let _ = yakmap::positions::to_pretty_string(update.raw());
        }
    }
});
