//! Parse entry points and start-rule selection.
//!
//! The default entry point is [parse], which runs the `Search` rule over
//! the whole input. Sub-grammars can be exercised directly through
//! [parse_rule] (by name) or [parse_start] (by enum), the escape hatch
//! used for grammar debugging. Every entry point requires its rule to
//! consume the entire input.

mod engine;
mod rules;

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use self::engine::Parser;
use super::annotation::Annotation;
use super::error::{ParseRuleError, SyntaxError, UnknownRuleError};
use super::token::{Operator, Pair, Token};

/// Grammar rules that can serve as a parse entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartRule {
    Search,
    Token,
    Pair,
    Key,
    Operator,
    Value,
    Query,
}

/// Name → rule table backing the by-name escape hatch. Read-only, built
/// once, shared by every invocation.
static START_RULES: Lazy<BTreeMap<&'static str, StartRule>> = Lazy::new(|| {
    BTreeMap::from([
        ("Search", StartRule::Search),
        ("Token", StartRule::Token),
        ("Pair", StartRule::Pair),
        ("Key", StartRule::Key),
        ("Operator", StartRule::Operator),
        ("Value", StartRule::Value),
        ("Query", StartRule::Query),
    ])
});

impl StartRule {
    /// Look up a rule by its grammar name. Case-sensitive.
    pub fn from_name(name: &str) -> Result<Self, UnknownRuleError> {
        START_RULES
            .get(name)
            .copied()
            .ok_or_else(|| UnknownRuleError {
                name: name.to_string(),
            })
    }

    pub fn name(&self) -> &'static str {
        match self {
            StartRule::Search => "Search",
            StartRule::Token => "Token",
            StartRule::Pair => "Pair",
            StartRule::Key => "Key",
            StartRule::Operator => "Operator",
            StartRule::Value => "Value",
            StartRule::Query => "Query",
        }
    }

    /// All names accepted by [StartRule::from_name], in sorted order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        START_RULES.keys().copied()
    }
}

impl fmt::Display for StartRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value produced by parsing from an explicit start rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleValue {
    Tokens(Vec<Token>),
    Token(Token),
    Pair(Annotation<Pair>),
    Key(Annotation<String>),
    Operator(Annotation<Operator>),
    Value(Annotation<String>),
    Query(Annotation<String>),
}

/// Parse a complete search string into its token sequence.
///
/// Empty and whitespace-only inputs yield an empty sequence; that is a
/// valid result, not an error.
pub fn parse(input: &str) -> Result<Vec<Token>, SyntaxError> {
    Parser::new(input).run_search()
}

/// Parse the whole input starting from an explicit grammar rule.
pub fn parse_start(input: &str, rule: StartRule) -> Result<RuleValue, SyntaxError> {
    Parser::new(input).run(rule)
}

/// Parse the whole input starting from a rule given by name.
///
/// An unknown name is a caller bug and fails with
/// [ParseRuleError::UnknownRule] before the input is looked at.
pub fn parse_rule(input: &str, name: &str) -> Result<RuleValue, ParseRuleError> {
    let rule = StartRule::from_name(name)?;
    Ok(parse_start(input, rule)?)
}
