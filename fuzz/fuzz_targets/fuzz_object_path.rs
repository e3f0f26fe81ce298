#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(raw) = std::str::from_utf8(data) {
        // Fuzz object path normalization - this should never panic
        let _ = skylift::ObjectPath::parse(raw);
    }
});
