#![no_main]

use libfuzzer_sys::fuzz_target;

use skylift::infrastructure::stores::StateManifest;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Fuzz manifest parsing and its remote-state view - never panics
        if let Ok(manifest) = toml::from_str::<StateManifest>(content) {
            let _ = manifest.to_remote_state();
        }
    }
});
