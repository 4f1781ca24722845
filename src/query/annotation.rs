//! Provenance wrapper for parsed tokens and their sub-parts.
//!
//! Every value a grammar rule produces is wrapped in an [Annotation]
//! recording which rule matched and exactly which slice of the input it
//! consumed. Downstream consumers use the spans to highlight terms in the
//! search bar; tests use them to check that no rule ever claims text it
//! did not read.

use serde::Serialize;
use std::fmt;

/// Grammar rule that produced an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleKind {
    Pair,
    Key,
    Operator,
    Value,
    Query,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::Pair => "Pair",
            RuleKind::Key => "Key",
            RuleKind::Operator => "Operator",
            RuleKind::Value => "Value",
            RuleKind::Query => "Query",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed value plus the input span it was read from.
///
/// `text` is the exact substring the rule consumed, including any trailing
/// whitespace the rule swallowed. `content` is the semantic payload with
/// that whitespace (and any quoting) stripped: a raw string for leaf rules,
/// a nested structure for composite rules.
///
/// Invariants: `end == offset + length` and `text` equals the input slice
/// `offset..end`, for every annotation of every successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation<T> {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    pub text: String,
    pub offset: usize,
    pub length: usize,
    pub end: usize,
    pub content: T,
}

impl<T> Annotation<T> {
    /// Wrap `content` with the span `start..end` of `input`.
    pub(crate) fn new(kind: RuleKind, input: &str, start: usize, end: usize, content: T) -> Self {
        Self {
            kind,
            text: input[start..end].to_string(),
            offset: start,
            length: end - start,
            end,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_are_consistent() {
        let input = "status: done";
        let ann = Annotation::new(RuleKind::Key, input, 0, 8, "status".to_string());
        assert_eq!(ann.text, "status: ");
        assert_eq!(ann.offset, 0);
        assert_eq!(ann.length, 8);
        assert_eq!(ann.end, 8);
        assert_eq!(ann.content, "status");
    }

    #[test]
    fn zero_width_annotation() {
        let ann = Annotation::new(RuleKind::Value, "tag:", 4, 4, String::new());
        assert_eq!(ann.text, "");
        assert_eq!(ann.length, 0);
        assert_eq!(ann.offset, ann.end);
    }

    #[test]
    fn rule_kind_names() {
        assert_eq!(RuleKind::Pair.as_str(), "Pair");
        assert_eq!(RuleKind::Query.to_string(), "Query");
    }
}
