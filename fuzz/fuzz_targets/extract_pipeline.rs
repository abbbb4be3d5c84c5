#![no_main]

use extract::{
    CategoryExtractor, Fanout, MetadataExtractor, ReaderConfig, TextExtractor,
    extract_reader_with_config,
};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes through the chunked reader: any split point, any encoding damage.
fuzz_target!(|data: &[u8]| {
    let Some((&chunk, body)) = data.split_first() else {
        return;
    };
    let config = ReaderConfig {
        chunk_size: usize::from(chunk).max(1),
        ..ReaderConfig::default()
    };

    let mut text = TextExtractor::new();
    let mut meta = MetadataExtractor::new(url_base());
    let mut categories = CategoryExtractor::new();
    {
        let mut fanout = Fanout::new()
            .with(&mut text)
            .with(&mut meta)
            .with(&mut categories);
        let _ = extract_reader_with_config(body, config, &mut fanout);
    }

    let out = text.text();
    assert!(!out.contains("  "));
    assert_eq!(out, out.trim());
});

fn url_base() -> Option<url::Url> {
    url::Url::parse("http://example.com/posts/2").ok()
}
