//! Fuzz target for LtDecoder::push_packet
//!
//! Feeds arbitrary byte chunks as a packet stream into a single decoder
//! instance. Should never panic regardless of how malformed or
//! out-of-sequence the chunks are.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qram_core::LtDecoder;

fuzz_target!(|chunks: Vec<Vec<u8>>| {
    let mut decoder = LtDecoder::new(8, 64, 0);
    for chunk in chunks.iter().take(256) {
        if decoder.push_packet(chunk) {
            break;
        }
    }
    let _ = decoder.get_result(512);
});
