#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Model XML decoding only, skipping the ZIP layer
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = platecalc::parser::parse_model_xml(xml);
    }
});
