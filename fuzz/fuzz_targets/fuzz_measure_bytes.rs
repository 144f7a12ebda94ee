#![no_main]

use libfuzzer_sys::fuzz_target;
use platecalc::{MeasureConfig, SniffPolicy, measure_bytes};

fuzz_target!(|data: &[u8]| {
    // Full pipeline for both formats: sniff/unzip -> decode -> area
    let config = MeasureConfig::default();
    let _ = measure_bytes("fuzz.stl", data, &config);
    let _ = measure_bytes("fuzz.3mf", data, &config);

    let text_first = config.with_sniff_policy(SniffPolicy::PreferText);
    let _ = measure_bytes("fuzz.stl", data, &text_first);
});
