//! Fuzz target for the lexical classifier and extractors.
//!
//! Run with: cargo +nightly fuzz run fuzz_scanner
//!
//! Arbitrary text must never panic, every classified offset must be in
//! bounds and strictly increasing, and every extracted symbol must start
//! with `std::`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stdinc_core::includes::extract_includes;
use stdinc_core::usage::extract_usages;
use stdinc_core::{Classifier, SourceText};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let source = SourceText::new(&text);

    let mut last = None;
    for (offset, _) in Classifier::new(&source) {
        assert!(offset < source.as_str().len());
        assert!(last.is_none_or(|prev| offset > prev));
        last = Some(offset);
    }

    for (symbol, line) in extract_usages(&source).iter() {
        assert!(symbol.starts_with("std::") && symbol.len() > 5);
        assert!(line >= 1 && line <= source.line_count());
    }
    let _ = extract_includes(&source, Some("proj"));
});
