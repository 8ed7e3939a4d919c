//! Fuzz target for the TOML configuration parser.
//!
//! Run with: cargo +nightly fuzz run fuzz_config_parser
//!
//! Feeds arbitrary text through `AppConfig::parse()` and, when it validates,
//! through registry construction.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = stdinc_config::AppConfig::parse(s) {
        // A validated config must always yield a registry.
        stdinc_core::Analyzer::from_config(&config).expect("validated config rejected");
    }
});
