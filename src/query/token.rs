//! Token types produced by a successful parse.

use serde::Serialize;
use std::fmt;

use super::annotation::Annotation;

/// Comparison operator of a `key operator value` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    #[serde(rename = ":")]
    Colon,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "!=")]
    Ne,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Colon => ":",
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Le => "<=",
            Operator::Ge => ">=",
            Operator::Ne => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The structured parts of a `key operator value` search term.
///
/// Each part keeps its own annotation; the value annotation is zero-width
/// when the value was omitted (`tag:` followed by whitespace or the end of
/// the input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub key: Annotation<String>,
    pub operator: Annotation<Operator>,
    pub value: Annotation<String>,
}

/// One parsed search term, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Token {
    /// A structured `key operator value` term.
    Pair(Annotation<Pair>),
    /// A free-text term, quoted or bare.
    Query(Annotation<String>),
}

impl Token {
    pub fn is_pair(&self) -> bool {
        matches!(self, Token::Pair(_))
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Token::Query(_))
    }

    /// Byte offset where this token's match began.
    pub fn offset(&self) -> usize {
        match self {
            Token::Pair(ann) => ann.offset,
            Token::Query(ann) => ann.offset,
        }
    }

    /// Byte offset just past this token's match.
    pub fn end(&self) -> usize {
        match self {
            Token::Pair(ann) => ann.end,
            Token::Query(ann) => ann.end,
        }
    }

    /// The exact input substring this token consumed.
    pub fn text(&self) -> &str {
        match self {
            Token::Pair(ann) => &ann.text,
            Token::Query(ann) => &ann.text,
        }
    }

    /// Key, operator, and value content of a pair token.
    pub fn as_pair(&self) -> Option<(&str, Operator, &str)> {
        match self {
            Token::Pair(ann) => Some((
                &ann.content.key.content,
                ann.content.operator.content,
                &ann.content.value.content,
            )),
            Token::Query(_) => None,
        }
    }

    /// Text content of a free-text token, with quoting stripped.
    pub fn as_query(&self) -> Option<&str> {
        match self {
            Token::Pair(_) => None,
            Token::Query(ann) => Some(&ann.content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_spellings() {
        assert_eq!(Operator::Colon.as_str(), ":");
        assert_eq!(Operator::Ne.as_str(), "!=");
        assert_eq!(Operator::Le.to_string(), "<=");
    }

    #[test]
    fn token_predicates() {
        let query = Token::Query(Annotation::new(
            super::super::annotation::RuleKind::Query,
            "draft",
            0,
            5,
            "draft".to_string(),
        ));
        assert!(query.is_query());
        assert!(!query.is_pair());
        assert_eq!(query.as_query(), Some("draft"));
        assert_eq!(query.as_pair(), None);
        assert_eq!(query.text(), "draft");
        assert_eq!((query.offset(), query.end()), (0, 5));
    }
}
