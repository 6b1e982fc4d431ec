//! Fuzzes the safetensors-style suffix-array container reader against
//! arbitrary byte streams. Must never panic on malformed input, only
//! return `Err`.

#![no_main]

use corpussift::suffix_array::read_container;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = read_container(&mut &data[..]);
});
