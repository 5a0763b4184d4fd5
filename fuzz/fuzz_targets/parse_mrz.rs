#![no_main]

use libfuzzer_sys::fuzz_target;
use mrzc::{parse_with_mode, RecoveryMode};

// Decoding arbitrary text must never panic, and anything that decodes must
// re-encode and decode again.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for mode in [RecoveryMode::Strict, RecoveryMode::Lenient] {
        if let Ok(record) = parse_with_mode(text, mode) {
            if let Ok(mrz) = record.to_mrz() {
                let _ = mrzc::parse(&mrz);
            }
        }
    }
    let _ = mrzc::cleaner::clean(text);
});
