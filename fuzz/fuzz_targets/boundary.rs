#![no_main]

use libfuzzer_sys::fuzz_target;
use isodump_decoder::boundary::{self, BoundaryMode};

// Fuzz target: boundary carving of arbitrary text.
//
// Candidates must be in-bounds slices of the input, start at ascending
// offsets, and every candidate must clear the minimum record length.
fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    for mode in [BoundaryMode::PanConfirmed, BoundaryMode::MtiOnly] {
        let candidates = boundary::split(content, mode);
        let mut last_offset = 0;
        for candidate in &candidates {
            assert!(candidate.offset >= last_offset);
            assert!(candidate.offset + candidate.text.len() <= content.len());
            assert!(candidate.text.len() >= isodump_types::layout::MIN_RECORD_LEN);
            last_offset = candidate.offset;
        }
    }
});
