use crate::attr::attr;
use crate::handler::TokenHandler;
use html::Token;
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// A set of labels, each trimmed and lowercased. Empty labels are never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Classification(BTreeSet<String>);

impl Classification {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the normalized label was new.
    pub fn insert(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        self.0.insert(label.to_lowercase())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(&label.trim().to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<'a> FromIterator<&'a str> for Classification {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label);
        }
        set
    }
}

/// Article sections and tags from `<meta property="article:section">` and
/// `<meta property="article:tag">`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryExtractor {
    categories: Classification,
    tags: Classification,
}

impl CategoryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &Classification {
        &self.categories
    }

    pub fn tags(&self) -> &Classification {
        &self.tags
    }

    /// `categories` and `tags` as sorted lists. Both keys are always present.
    pub fn to_dict(&self) -> BTreeMap<&'static str, Vec<String>> {
        BTreeMap::from([
            ("categories", self.categories.to_vec()),
            ("tags", self.tags.to_vec()),
        ])
    }
}

impl TokenHandler for CategoryExtractor {
    fn handle_token(&mut self, token: &Token) {
        if token.name() != Some("meta") || !token.is_opening_tag() {
            return;
        }
        let Some(content) = attr(token, "content") else {
            return;
        };
        match attr(token, "property") {
            Some("article:section") => {
                self.categories.insert(content);
            }
            Some("article:tag") => {
                self.tags.insert(content);
            }
            _ => {}
        }
    }
}
