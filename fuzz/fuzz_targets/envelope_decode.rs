//! Fuzz target for the compression and file envelope decoders
//!
//! Should never panic. `maybe_decompress` may return an error for an
//! unrecognized algorithm byte; `unwrap_file` absorbs every malformed input
//! into `None`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use qram_core::{compression, file_envelope};

fuzz_target!(|data: &[u8]| {
    let _ = compression::maybe_decompress(data);
    let _ = file_envelope::unwrap_file(data);
    let _ = file_envelope::unwrap_file_strict(data);
});
