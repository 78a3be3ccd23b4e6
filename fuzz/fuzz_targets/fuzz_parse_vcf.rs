#![no_main]

use libfuzzer_sys::fuzz_target;
use vcfcodec::{parse_vcf, write_vcf, WriterConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Decoding must never panic, only fail with an error
    let Ok(document) = parse_vcf(text, None) else {
        return;
    };

    // Anything that decoded must encode, and the output must decode again
    if let Ok(written) = write_vcf(&document, &WriterConfig::default()) {
        let _ = parse_vcf(&written, None);
    }
});
