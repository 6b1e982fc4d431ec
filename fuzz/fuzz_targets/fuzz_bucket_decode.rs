//! Fuzzes the base64 bucket-signature decode path (the `dedup` subcommand's
//! read side) against arbitrary strings. Must never panic, only `Err`.

#![no_main]

use corpussift::pipeline::decode_buckets;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let encoded = vec![data.to_string()];
    let _ = decode_buckets(&encoded, 10);
});
