//! Page metadata from `<title>`, OpenGraph and plain `<meta>` tags, and `<link rel>` tags.
//!
//! Every source writes its own raw key (`og_title`, `meta_description`,
//! `link_rel_canonical`, ...). Sources that describe the same thing also compete for a shared
//! alias (`title`, `description`, `url`, `favicon`, ...) by weight: the alias keeps the
//! heaviest field merged into it, and the first one on a tie.

use crate::attr::attr;
use crate::handler::TokenHandler;
use crate::url::resolve_relative_url;
use html::Token;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use url::Url;

const LOG_TARGET: &str = "extract.metadata";

/// `property` prefix of OpenGraph meta tags.
pub const NAMESPACE_PREFIX: &str = "og:";

/// OpenGraph keys whose values are URLs and get resolved against the base URL.
pub static NAMESPACED_URL_KEYS: &[&str] = &["url", "image", "audio", "video"];

/// Namespaced fields outrank title and plain meta fields for the same alias.
const NAMESPACED_WEIGHT: i32 = 1;
/// `<link rel="icon">` outranks `<link rel="shortcut icon">` for `favicon`.
const ICON_WEIGHT: i32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    TitleTag,
    Namespaced,
    PlainMeta,
    LinkRel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    /// Raw, source-specific key, e.g. `og_title`.
    pub key: String,
    pub value: String,
    pub source: SourceKind,
    pub weight: i32,
}

impl MetadataField {
    pub fn new(key: impl Into<String>, value: impl Into<String>, source: SourceKind) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            source,
            weight: 0,
        }
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }
}

/// Key → field table, iterated in key order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    fields: BTreeMap<String, MetadataField>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `field` under its raw key, and under `alias` unless the alias already holds a
    /// field of equal or greater weight.
    pub fn merge(&mut self, alias: &str, field: MetadataField) {
        log::trace!(
            target: LOG_TARGET,
            "merge {} -> {alias} (weight {}): {:?}",
            field.key,
            field.weight,
            field.value
        );
        self.fields.insert(field.key.clone(), field.clone());
        match self.fields.entry(alias.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(field);
            }
            Entry::Occupied(mut slot) => {
                if field.weight > slot.get().weight {
                    slot.insert(field);
                }
            }
        }
    }

    /// Record `field` under its raw key only.
    pub fn insert(&mut self, field: MetadataField) {
        log::trace!(target: LOG_TARGET, "set {}: {:?}", field.key, field.value);
        self.fields.insert(field.key.clone(), field);
    }

    pub fn get(&self, key: &str) -> Option<&MetadataField> {
        self.fields.get(key)
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(|field| field.value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataField)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flatten to key → value.
    pub fn to_dict(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.value.clone()))
            .collect()
    }
}

/// Gathers [`Metadata`] from a token stream.
///
/// URL-valued OpenGraph fields and every link `href` are made absolute against the base URL,
/// when one is given.
#[derive(Clone, Debug, Default)]
pub struct MetadataExtractor {
    metadata: Metadata,
    base_url: Option<Url>,
    in_title: bool,
    title_seen: bool,
}

impl MetadataExtractor {
    pub fn new(base_url: Option<Url>) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_metadata(self) -> Metadata {
        self.metadata
    }

    /// An empty value stays empty; joining it would yield the base URL itself.
    fn absolutize(&self, href: &str) -> String {
        if href.is_empty() {
            return String::new();
        }
        resolve_relative_url(self.base_url.as_ref(), href)
    }

    fn title_text(&mut self, text: &str) {
        let title = text.trim();
        if title.is_empty() {
            return;
        }
        self.title_seen = true;
        self.metadata.merge(
            "title",
            MetadataField::new("title_tag", title, SourceKind::TitleTag),
        );
    }

    fn meta(&mut self, token: &Token) {
        if let Some(key) = attr(token, "property").and_then(|p| p.strip_prefix(NAMESPACE_PREFIX)) {
            let value = match attr(token, "content") {
                Some(content) if NAMESPACED_URL_KEYS.contains(&key) => self.absolutize(content),
                Some(content) => content.to_string(),
                None => String::new(),
            };
            self.metadata.merge(
                key,
                MetadataField::new(format!("og_{key}"), value, SourceKind::Namespaced)
                    .with_weight(NAMESPACED_WEIGHT),
            );
        }

        if let Some(name) = attr(token, "name") {
            let content = attr(token, "content").unwrap_or_default();
            self.metadata.merge(
                name,
                MetadataField::new(format!("meta_{name}"), content, SourceKind::PlainMeta),
            );
        }
    }

    fn link(&mut self, token: &Token) {
        let Some(rel) = attr(token, "rel") else {
            return;
        };
        let href = attr(token, "href")
            .map(|href| self.absolutize(href))
            .unwrap_or_default();
        let field = MetadataField::new(format!("link_rel_{rel}"), href, SourceKind::LinkRel);

        match rel {
            "canonical" => self.metadata.merge("url", field),
            "icon" => self.metadata.merge("favicon", field.with_weight(ICON_WEIGHT)),
            "shortcut icon" => self.metadata.merge("favicon", field),
            _ => self.metadata.insert(field),
        }
    }
}

impl TokenHandler for MetadataExtractor {
    fn handle_token(&mut self, token: &Token) {
        match token {
            Token::Text(text) if self.in_title && !self.title_seen => self.title_text(text),
            Token::StartTag { name, .. } if name == "title" => self.in_title = true,
            Token::EndTag(name) if name == "title" => self.in_title = false,
            // <meta> and <link> are void, so they show up with or without the trailing slash.
            Token::StartTag { name, .. } | Token::SelfClosingTag { name, .. } => {
                match name.as_str() {
                    "meta" => self.meta(token),
                    "link" => self.link(token),
                    _ => {}
                }
            }
            Token::Text(_) | Token::EndTag(_) | Token::Comment(_) | Token::Doctype(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::extract_str;
    use pretty_assertions::assert_eq;

    fn metadata_of(input: &str, base: Option<&str>) -> Metadata {
        let base = base.map(|b| Url::parse(b).unwrap());
        let mut meta = MetadataExtractor::new(base);
        extract_str(input, &mut meta);
        meta.into_metadata()
    }

    fn field(key: &str, value: &str, source: SourceKind, weight: i32) -> MetadataField {
        MetadataField::new(key, value, source).with_weight(weight)
    }

    const DOC: &str = r#"
<html>
<head>
<title>Hello there.</title>
<link rel="canonical" href="http://www.example.com/posts/2" />
<link rel="next" href="./3" />
<link rel="all" href="all" />
<link rel="all_short" href="all/short" />
<link rel="home" href="../.." />
<link rel="shortcut icon" href="http://example.com/favicon.ico" />
<link rel="icon" href="http://example.com/favicon.png" />
<meta property="og:site_name" content="Hello Site" />
<meta property="og:title" content="Also hello." />
<meta property="og:description" content="This page doesn't have a whole lot going on." />
<meta name="description" content="Different description" />
<meta property="og:type" content="article" />
<meta property="og:url" content="http://example.com/" />
<meta property="og:image" content="/80x60.png" />
</head>
</html>
"#;

    #[test]
    fn full_document() {
        use SourceKind::*;
        let meta = metadata_of(DOC, Some("http://example.com/posts/2"));

        let expected = [
            (
                // `url` itself goes to og:url, which outweighs the canonical link.
                &["link_rel_canonical"][..],
                field("link_rel_canonical", "http://www.example.com/posts/2", LinkRel, 0),
            ),
            (
                &["link_rel_next"][..],
                field("link_rel_next", "http://example.com/posts/3", LinkRel, 0),
            ),
            (
                &["link_rel_all"][..],
                field("link_rel_all", "http://example.com/posts/all", LinkRel, 0),
            ),
            (
                &["link_rel_all_short"][..],
                field("link_rel_all_short", "http://example.com/posts/all/short", LinkRel, 0),
            ),
            (
                &["link_rel_home"][..],
                field("link_rel_home", "http://example.com/", LinkRel, 0),
            ),
            (
                &["site_name", "og_site_name"][..],
                field("og_site_name", "Hello Site", Namespaced, 1),
            ),
            (
                &["title", "og_title"][..],
                field("og_title", "Also hello.", Namespaced, 1),
            ),
            (
                &["title_tag"][..],
                field("title_tag", "Hello there.", TitleTag, 0),
            ),
            (
                &["description", "og_description"][..],
                field(
                    "og_description",
                    "This page doesn't have a whole lot going on.",
                    Namespaced,
                    1,
                ),
            ),
            (
                &["meta_description"][..],
                field("meta_description", "Different description", PlainMeta, 0),
            ),
            (&["type", "og_type"][..], field("og_type", "article", Namespaced, 1)),
            (
                &["url", "og_url"][..],
                field("og_url", "http://example.com/", Namespaced, 1),
            ),
            (
                &["image", "og_image"][..],
                field("og_image", "http://example.com/80x60.png", Namespaced, 1),
            ),
            (
                &["favicon", "link_rel_icon"][..],
                field("link_rel_icon", "http://example.com/favicon.png", LinkRel, 1),
            ),
            (
                &["link_rel_shortcut icon"][..],
                field("link_rel_shortcut icon", "http://example.com/favicon.ico", LinkRel, 0),
            ),
        ];

        for (keys, expected) in expected {
            for key in keys {
                assert_eq!(meta.get(key), Some(&expected), "key {key}");
            }
        }
    }

    #[test]
    fn namespaced_beats_plain_meta_in_either_order() {
        let og = r#"<meta property="og:description" content="og">"#;
        let plain = r#"<meta name="description" content="plain">"#;
        for doc in [format!("{og}{plain}"), format!("{plain}{og}")] {
            let meta = metadata_of(&doc, None);
            assert_eq!(meta.value("description"), Some("og"), "doc {doc}");
            assert_eq!(meta.value("og_description"), Some("og"));
            assert_eq!(meta.value("meta_description"), Some("plain"));
        }
    }

    #[test]
    fn namespaced_title_beats_title_tag_in_either_order() {
        let og = r#"<meta property="og:title" content="og">"#;
        let tag = "<title> tag </title>";
        for doc in [format!("{og}{tag}"), format!("{tag}{og}")] {
            let meta = metadata_of(&doc, None);
            assert_eq!(meta.value("title"), Some("og"), "doc {doc}");
            assert_eq!(meta.value("title_tag"), Some("tag"));
        }
    }

    #[test]
    fn equal_weight_keeps_first_seen() {
        let meta = metadata_of(
            r#"<title>From tag</title><meta name="title" content="From meta">"#,
            None,
        );
        assert_eq!(meta.get("title").map(|f| f.source), Some(SourceKind::TitleTag));
        assert_eq!(meta.value("meta_title"), Some("From meta"));
    }

    #[test]
    fn only_first_nonempty_title_counts() {
        let meta = metadata_of(
            "<title>   </title><title>First</title><svg><title>Second</title></svg>",
            None,
        );
        assert_eq!(meta.value("title"), Some("First"));
        assert_eq!(meta.value("title_tag"), Some("First"));
    }

    #[test]
    fn text_outside_title_is_ignored() {
        let meta = metadata_of("<p>not a title</p><title></title>after", None);
        assert!(meta.is_empty());
    }

    #[test]
    fn canonical_link_populates_url() {
        let meta = metadata_of(r#"<link rel="canonical" href="http://www.example.com/">"#, None);
        assert_eq!(meta.value("link_rel_canonical"), Some("http://www.example.com/"));
        assert_eq!(meta.value("url"), Some("http://www.example.com/"));
    }

    #[test]
    fn icon_beats_shortcut_icon_in_either_order() {
        let icon = r#"<link rel="icon" href="A">"#;
        let shortcut = r#"<link rel="shortcut icon" href="B">"#;
        for doc in [format!("{icon}{shortcut}"), format!("{shortcut}{icon}")] {
            let meta = metadata_of(&doc, None);
            assert_eq!(meta.value("favicon"), Some("A"), "doc {doc}");
            assert_eq!(meta.value("link_rel_icon"), Some("A"));
            assert_eq!(meta.value("link_rel_shortcut icon"), Some("B"));
        }
    }

    #[test]
    fn relative_urls_resolve_only_with_base() {
        let doc = r#"<link rel="next" href="./3"><meta property="og:image" content="img.png"><meta property="og:title" content="./not-a-url">"#;

        let with_base = metadata_of(doc, Some("http://example.com/posts/2"));
        assert_eq!(with_base.value("link_rel_next"), Some("http://example.com/posts/3"));
        assert_eq!(with_base.value("image"), Some("http://example.com/posts/img.png"));
        assert_eq!(with_base.value("title"), Some("./not-a-url"));

        let without_base = metadata_of(doc, None);
        assert_eq!(without_base.value("link_rel_next"), Some("./3"));
        assert_eq!(without_base.value("image"), Some("img.png"));
    }

    #[test]
    fn missing_content_and_href_are_empty() {
        let meta = metadata_of(
            r#"<meta property="og:image"><meta name="keywords"><link rel="next"><link href="/orphan">"#,
            Some("http://example.com/"),
        );
        assert_eq!(meta.value("og_image"), Some(""));
        assert_eq!(meta.value("meta_keywords"), Some(""));
        assert_eq!(meta.value("link_rel_next"), Some(""));
        assert_eq!(meta.len(), 5);
    }

    #[test]
    fn empty_urls_are_not_resolved_against_the_base() {
        let meta = metadata_of(
            r#"<meta property="og:image" content=""><link rel="icon" href=""><link rel="canonical" href="">"#,
            Some("http://example.com/posts/2"),
        );
        assert_eq!(meta.value("image"), Some(""));
        assert_eq!(meta.value("favicon"), Some(""));
        assert_eq!(meta.value("url"), Some(""));
        assert_eq!(meta.value("link_rel_icon"), Some(""));
    }

    #[test]
    fn alias_invariant_holds_after_every_token() {
        let mut extractor = MetadataExtractor::new(None);
        let tokens = html::tokenize(
            r#"<meta name="description" content="plain"><meta property="og:description" content="og"><meta name="description" content="late">"#,
        );
        let expected = ["plain", "og", "og"];
        for (token, want) in tokens.iter().zip(expected) {
            extractor.handle_token(token);
            assert_eq!(extractor.metadata().value("description"), Some(want));
        }
        assert_eq!(extractor.metadata().value("meta_description"), Some("late"));
    }

    #[test]
    fn to_dict_flattens_values() {
        let meta = metadata_of(r#"<meta property="og:type" content="article">"#, None);
        let dict = meta.to_dict();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict["type"], "article");
        assert_eq!(dict["og_type"], "article");
    }

    #[test]
    fn serializes_as_a_key_ordered_map() {
        let meta = metadata_of(r#"<link rel="icon" href="/f.png">"#, None);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "favicon": {"key": "link_rel_icon", "value": "/f.png", "source": "link_rel", "weight": 1},
                "link_rel_icon": {"key": "link_rel_icon", "value": "/f.png", "source": "link_rel", "weight": 1},
            })
        );
    }
}
