#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    for token in html::Tokenizer::new(input) {
        if let Some(name) = token.name() {
            assert!(!name.is_empty());
            assert!(!name.bytes().any(|b| b.is_ascii_uppercase()));
        }
    }
});
