//! Fuzz target for Packet::decode
//!
//! Should never panic. All invalid inputs return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qram_proto::Packet;

fuzz_target!(|data: &[u8]| {
    let _ = Packet::decode(data);
});
