#![no_main]

use esflow::span::SourceUrl;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(data) = std::str::from_utf8(data) else {
        return;
    };

    let _ = esflow::parse_source(SourceUrl::anonymous(), data);
});
