//! Fuzz target: region/realm/timestamp tuple decoder.
//!
//! Arbitrary bodies must never panic, and anything that decodes must
//! survive re-encoding unchanged.

#![no_main]

use libfuzzer_sys::fuzz_target;
use market_core::{decode_tuples, encode_tuples};

fuzz_target!(|data: &[u8]| {
    let Ok(tuples) = decode_tuples(data) else {
        return;
    };
    let encoded = encode_tuples(&tuples).expect("decoded tuples must encode");
    let again = decode_tuples(encoded.as_bytes()).expect("encoded tuples must decode");
    assert_eq!(again, tuples);
});
