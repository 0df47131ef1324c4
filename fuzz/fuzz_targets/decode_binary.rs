#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: the binary record decoder on raw bytes.
//
// Catches bugs in:
// - MTI plausibility fault handling
// - Bitmap-declared fields past the end of the buffer
// - Resynchronizer forward-progress (must terminate on any input)
// - Amount dual-decode byte handling
fuzz_target!(|data: &[u8]| {
    let (records, _diagnostics) =
        isodump_decoder::binary::BinaryDecoder::new(data, None).decode_all();

    // Every emitted record keeps the decoded-MTI invariant: plausible
    // 4-digit text or an 8-char hex fallback.
    for record in &records {
        assert!(record.mti.len() == 4 || record.mti.len() == 8);
    }
});
