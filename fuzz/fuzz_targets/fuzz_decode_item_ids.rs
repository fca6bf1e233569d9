//! Fuzz target: item id decoder, plain and base64-wrapped.

#![no_main]

use libfuzzer_sys::fuzz_target;
use market_core::{decode_item_ids, wrap_base64};

fuzz_target!(|data: &[u8]| {
    let plain = decode_item_ids(data);

    // A JSON body must decode the same whether or not it is wrapped.
    if data.trim_ascii_start().first() != Some(&b'[') {
        return;
    }
    if let Ok(text) = std::str::from_utf8(data) {
        let wrapped = decode_item_ids(wrap_base64(text).as_bytes());
        assert_eq!(plain.ok(), wrapped.ok());
    }
});
