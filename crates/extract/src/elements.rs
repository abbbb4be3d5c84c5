//! Element classification tables used by the text extractor.
//!
//! All names are lowercase, matching what the tokenizer emits.

/// Elements that never have children and are therefore never pushed onto the element stack.
pub static VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose whole subtree is left out of the text.
pub static IGNORED_ELEMENTS: &[&str] = &[
    "audio", "canvas", "command", "embed", "iframe", "map", "math", "menu", "noscript", "object",
    "script", "style", "svg", "video",
];

/// Elements that flow with the surrounding text instead of starting a new block.
pub static INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdo", "big", "br", "button", "cite", "code", "dfn", "em", "i", "img",
    "input", "kbd", "label", "map", "object", "q", "samp", "script", "select", "small", "span",
    "strong", "sub", "sup", "textarea", "tt", "var",
];

/// `id` values of third-party widget containers (comment threads and the like).
pub static IGNORED_IDS: &[&str] = &["disqus_thread"];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_ignored(name: &str) -> bool {
    IGNORED_ELEMENTS.contains(&name)
}

pub fn is_inline(name: &str) -> bool {
    INLINE_ELEMENTS.contains(&name)
}

pub fn is_ignored_id(id: &str) -> bool {
    IGNORED_IDS.contains(&id)
}
