#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: the full engine over arbitrary bytes.
//
// Input format:
//   byte 0: filename selector (extension drives binary/text routing)
//   bytes 1..: dump content
//
// The engine must never panic: any input yields a (possibly empty)
// record list plus diagnostics.
//
// Catches bugs in:
// - Format classification (extension / control prefix / NUL sniff)
// - Charset detection and lossy text decoding
// - Cursor arithmetic across both decoder paths
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let filename = match data[0] % 3 {
        0 => "fuzz.001",
        1 => "fuzz.002",
        _ => "fuzz.txt",
    };

    let engine = isodump_decoder::DumpDecoder::new();
    let _ = engine.decode(&data[1..], filename);
});
