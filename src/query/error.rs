//! Syntax errors and the expectation model behind their messages.
//!
//! A failed parse reports the single furthest position any alternative
//! reached, plus the set of expectations recorded at exactly that
//! position. Messages render as `Expected <descriptions> but <found>
//! found.`, with descriptions deduplicated and sorted so the same failure
//! always produces the same message.

use serde::Serialize;
use std::fmt;

use super::position::Location;

/// One element of a character-class expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassPart {
    Single(char),
    Range(char, char),
}

impl ClassPart {
    pub(crate) fn contains(&self, ch: char) -> bool {
        match self {
            ClassPart::Single(c) => *c == ch,
            ClassPart::Range(lo, hi) => (*lo..=*hi).contains(&ch),
        }
    }
}

/// What the parser would have accepted at a failure position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expectation {
    /// An exact string, e.g. `":"`.
    Literal(String),
    /// A character class, e.g. `[<>!=]`.
    Class {
        parts: Vec<ClassPart>,
        inverted: bool,
    },
    /// Any single character.
    Any,
    /// The end of the input.
    End,
    /// A named higher-level rule, e.g. `whitespace`. While such a rule
    /// runs, the low-level expectations of its body are suppressed; only
    /// the name surfaces if the rule fails as a whole.
    Other(String),
}

impl Expectation {
    pub(crate) fn literal(text: &str) -> Self {
        Expectation::Literal(text.to_string())
    }

    pub(crate) fn other(description: &str) -> Self {
        Expectation::Other(description.to_string())
    }

    /// Human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Expectation::Literal(text) => format!("\"{}\"", escape_literal(text)),
            Expectation::Class { parts, inverted } => {
                let mut out = String::from("[");
                if *inverted {
                    out.push('^');
                }
                for part in parts {
                    match part {
                        ClassPart::Single(c) => escape_class_char(*c, &mut out),
                        ClassPart::Range(lo, hi) => {
                            escape_class_char(*lo, &mut out);
                            out.push('-');
                            escape_class_char(*hi, &mut out);
                        }
                    }
                }
                out.push(']');
                out
            }
            Expectation::Any => "any character".to_string(),
            Expectation::End => "end of input".to_string(),
            Expectation::Other(description) => description.clone(),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

fn is_escaped_control(ch: char) -> bool {
    matches!(ch as u32, 0x00..=0x1F | 0x7F..=0x9F)
}

fn escape_common(ch: char, out: &mut String) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '"' => out.push_str("\\\""),
        c if is_escaped_control(c) => {
            out.push_str(&format!("\\x{:02X}", c as u32));
        }
        c => out.push(c),
    }
}

/// Escape a literal for quoting inside an error message.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        escape_common(ch, &mut out);
    }
    out
}

/// Escape a character for display inside `[...]`. The class metacharacters
/// replace the quote in the escape set; a quote is ordinary there.
fn escape_class_char(ch: char, out: &mut String) {
    match ch {
        '\\' => out.push_str("\\\\"),
        ']' => out.push_str("\\]"),
        '^' => out.push_str("\\^"),
        '-' => out.push_str("\\-"),
        c if is_escaped_control(c) => {
            out.push_str(&format!("\\x{:02X}", c as u32));
        }
        c => out.push(c),
    }
}

/// Join sorted descriptions per English list conventions:
/// `A`, `A or B`, `A, B, or C`.
fn describe_expected(descriptions: &[String]) -> String {
    match descriptions {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} or {}", first, second),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}

fn describe_found(found: Option<char>) -> String {
    match found {
        Some(ch) => {
            let mut out = String::from("\"");
            escape_common(ch, &mut out);
            out.push('"');
            out
        }
        None => "end of input".to_string(),
    }
}

/// Failure to parse an input.
///
/// `location` brackets the offending character (zero-width at end of
/// input), so a search UI can highlight the range and fall back to
/// treating the raw string as free text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntaxError {
    pub message: String,
    /// Expectations recorded at the failure position, deduplicated and
    /// sorted by description.
    pub expected: Vec<Expectation>,
    /// The offending character, or `None` at end of input.
    pub found: Option<char>,
    pub location: Location,
}

impl SyntaxError {
    pub(crate) fn new(expected: Vec<Expectation>, found: Option<char>, location: Location) -> Self {
        let mut described: Vec<(String, Expectation)> = expected
            .into_iter()
            .map(|expectation| (expectation.describe(), expectation))
            .collect();
        described.sort_by(|a, b| a.0.cmp(&b.0));
        described.dedup_by(|a, b| a.0 == b.0);

        let descriptions: Vec<String> = described.iter().map(|(d, _)| d.clone()).collect();
        let message = format!(
            "Expected {} but {} found.",
            describe_expected(&descriptions),
            describe_found(found)
        );

        Self {
            message,
            expected: described.into_iter().map(|(_, e)| e).collect(),
            found,
            location,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// The caller asked to start parsing from a rule name the grammar does not
/// define. A caller bug, not an input problem: independent of the input
/// and never recoverable by rephrasing the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRuleError {
    pub name: String,
}

impl fmt::Display for UnknownRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown start rule \"{}\"", self.name)
    }
}

impl std::error::Error for UnknownRuleError {}

/// Errors from the named start-rule entry point.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseRuleError {
    /// The requested start rule does not exist.
    UnknownRule(UnknownRuleError),
    /// The input did not match the requested rule.
    Syntax(SyntaxError),
}

impl fmt::Display for ParseRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseRuleError::UnknownRule(err) => err.fmt(f),
            ParseRuleError::Syntax(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseRuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseRuleError::UnknownRule(err) => Some(err),
            ParseRuleError::Syntax(err) => Some(err),
        }
    }
}

impl From<SyntaxError> for ParseRuleError {
    fn from(err: SyntaxError) -> Self {
        ParseRuleError::Syntax(err)
    }
}

impl From<UnknownRuleError> for ParseRuleError {
    fn from(err: UnknownRuleError) -> Self {
        ParseRuleError::UnknownRule(err)
    }
}
