#![no_main]

use libfuzzer_sys::fuzz_target;
use isodump_wire::bitmap::{decode_bitmap, encode_bitmap};

// Fuzz target: bitmap decode and its encode inverse.
//
// decode_bitmap is total over any 8-byte prefix; the decoded field set
// must be strictly ascending in 2..=64, and re-encoding it must decode
// to the same set.
fuzz_target!(|data: &[u8]| {
    let Ok(fields) = decode_bitmap(data) else {
        assert!(data.len() < 8);
        return;
    };

    for pair in fields.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(fields.iter().all(|&n| (2..=64).contains(&n)));

    let reencoded = encode_bitmap(&fields);
    assert_eq!(decode_bitmap(&reencoded).unwrap(), fields);
});
