use crate::handler::TokenHandler;
use html::Token;

/// First value of attribute `key` on a start or self-closing tag.
///
/// Duplicate attributes resolve to the first occurrence. A valueless attribute
/// (`<input disabled>`) reads as the empty string; an absent one as `None`.
pub fn attr<'t>(token: &'t Token, key: &str) -> Option<&'t str> {
    token
        .attributes()
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_deref().unwrap_or(""))
}

/// Collects the values of one attribute from every instance of one element,
/// e.g. every `src` of every `img`.
#[derive(Clone, Debug)]
pub struct ElementAttributeExtractor {
    element: String,
    key: String,
    values: Vec<String>,
}

impl ElementAttributeExtractor {
    pub fn new(element: &str, key: &str) -> Self {
        Self {
            element: element.to_ascii_lowercase(),
            key: key.to_ascii_lowercase(),
            values: Vec::new(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

impl TokenHandler for ElementAttributeExtractor {
    fn handle_token(&mut self, token: &Token) {
        if token.is_opening_tag()
            && token.name() == Some(self.element.as_str())
            && let Some(value) = attr(token, &self.key)
        {
            self.values.push(value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::extract_str;
    use html::tokenize;

    #[test]
    fn attr_returns_first_match() {
        let tokens = tokenize(r#"<div id="one" class="x" id="two" hidden>"#);
        let div = &tokens[0];
        assert_eq!(attr(div, "id"), Some("one"));
        assert_eq!(attr(div, "class"), Some("x"));
        assert_eq!(attr(div, "hidden"), Some(""));
        assert_eq!(attr(div, "title"), None);
    }

    #[test]
    fn attr_is_none_for_non_tags() {
        assert_eq!(attr(&Token::Text("id".to_string()), "id"), None);
        assert_eq!(attr(&Token::EndTag("div".to_string()), "id"), None);
    }

    #[test]
    fn collects_attribute_from_start_and_self_closing_tags() {
        let mut images = ElementAttributeExtractor::new("IMG", "src");
        extract_str(
            r#"<img src="a.png"><p><img alt="no src"/><img src='b.png' /></p><image src="c.png">"#,
            &mut images,
        );
        assert_eq!(images.values(), ["a.png", "b.png"]);
        assert_eq!(images.into_values(), vec!["a.png", "b.png"]);
    }
}
