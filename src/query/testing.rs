//! Test helpers for asserting on parsed token sequences.
//!
//! Integration tests compare parses against compact [TokenSummary] values
//! instead of spelling out every annotation field, and run every result
//! through [assert_span_consistency] so no assertion forgets the span
//! invariants.

use super::annotation::Annotation;
use super::grammar::parse;
use super::token::{Operator, Token};

/// A token stripped down to its semantic content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSummary {
    Pair {
        key: String,
        operator: Operator,
        value: String,
    },
    Query {
        text: String,
    },
}

/// Expected pair token.
pub fn pair(key: &str, operator: Operator, value: &str) -> TokenSummary {
    TokenSummary::Pair {
        key: key.to_string(),
        operator,
        value: value.to_string(),
    }
}

/// Expected free-text token.
pub fn query(text: &str) -> TokenSummary {
    TokenSummary::Query {
        text: text.to_string(),
    }
}

/// Semantic view of a parsed token sequence.
pub fn summarize(tokens: &[Token]) -> Vec<TokenSummary> {
    tokens
        .iter()
        .map(|token| match token {
            Token::Pair(ann) => TokenSummary::Pair {
                key: ann.content.key.content.clone(),
                operator: ann.content.operator.content,
                value: ann.content.value.content.clone(),
            },
            Token::Query(ann) => TokenSummary::Query {
                text: ann.content.clone(),
            },
        })
        .collect()
}

/// Assert that every annotation's recorded span matches the input text it
/// claims to cover. Pair tokens are checked part by part.
pub fn assert_span_consistency(input: &str, tokens: &[Token]) {
    for token in tokens {
        match token {
            Token::Pair(ann) => {
                check_annotation(input, ann);
                check_annotation(input, &ann.content.key);
                check_annotation(input, &ann.content.operator);
                check_annotation(input, &ann.content.value);
            }
            Token::Query(ann) => check_annotation(input, ann),
        }
    }
}

fn check_annotation<T>(input: &str, ann: &Annotation<T>) {
    assert_eq!(
        ann.end,
        ann.offset + ann.length,
        "{} annotation at {} has inconsistent span arithmetic",
        ann.kind,
        ann.offset
    );
    assert_eq!(
        &input[ann.offset..ann.end],
        ann.text,
        "{} annotation at {} does not match the input it claims to cover",
        ann.kind,
        ann.offset
    );
}

/// Parse `input`, check span consistency, and compare the semantic view.
pub fn assert_tokens(input: &str, expected: &[TokenSummary]) {
    let tokens =
        parse(input).unwrap_or_else(|err| panic!("parse of {:?} failed: {}", input, err));
    assert_span_consistency(input, &tokens);
    assert_eq!(summarize(&tokens), expected, "tokens for {:?}", input);
}
