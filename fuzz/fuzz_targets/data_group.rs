#![no_main]

use libfuzzer_sys::fuzz_target;
use mrzc::dg1::decode_data_group;

fuzz_target!(|data: &[u8]| {
    for length in [90, 88, 72] {
        let _ = decode_data_group(data, length);
    }
});
