/// Attribute list in encounter order. Valueless attributes (`<input disabled>`) carry `None`.
pub type Attributes = Vec<(String, Option<String>)>;

/// A single markup token.
///
/// Element and attribute names are ASCII-lowercased by the tokenizer. Text payloads are
/// entity-decoded but otherwise untouched, whitespace included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Doctype(String),
    StartTag { name: String, attributes: Attributes },
    /// A tag written with an explicit `/>`.
    SelfClosingTag { name: String, attributes: Attributes },
    EndTag(String),
    Comment(String),
    Text(String),
}

impl Token {
    /// Element name for tag tokens.
    pub fn name(&self) -> Option<&str> {
        match self {
            Token::StartTag { name, .. }
            | Token::SelfClosingTag { name, .. }
            | Token::EndTag(name) => Some(name),
            Token::Doctype(_) | Token::Comment(_) | Token::Text(_) => None,
        }
    }

    /// Attributes of start and self-closing tags; empty for everything else.
    pub fn attributes(&self) -> &[(String, Option<String>)] {
        match self {
            Token::StartTag { attributes, .. } | Token::SelfClosingTag { attributes, .. } => {
                attributes
            }
            _ => &[],
        }
    }

    /// Text payload of text, comment and doctype tokens.
    pub fn data(&self) -> Option<&str> {
        match self {
            Token::Text(s) | Token::Comment(s) | Token::Doctype(s) => Some(s),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Token::Doctype(_) => "Doctype",
            Token::StartTag { .. } => "StartTag",
            Token::SelfClosingTag { .. } => "SelfClosingTag",
            Token::EndTag(_) => "EndTag",
            Token::Comment(_) => "Comment",
            Token::Text(_) => "Text",
        }
    }

    /// True for start tags and self-closing tags, the two forms an opening element can take.
    pub fn is_opening_tag(&self) -> bool {
        matches!(self, Token::StartTag { .. } | Token::SelfClosingTag { .. })
    }
}
