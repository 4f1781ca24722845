//! Search query parsing.
//!
//! The grammar is a small PEG evaluated by recursive descent directly over
//! the input string:
//!
//! ```text
//! Search   := WS Token* WS
//! Token    := Pair | Query
//! Pair     := Key Operator Value
//! Key      := [A-Za-z0-9_-]+ WS
//! Operator := (":" | [<>!=][=] | "=" | [<>]) WS
//! Value    := QuotedOrBare WS | Novalue
//! Query    := QuotedOrBare WS
//! ```
//!
//! A failed parse reports the furthest input position any alternative
//! reached, together with the set of expectations recorded there; see
//! [SyntaxError].

pub mod annotation;
pub mod error;
pub mod grammar;
pub mod position;
pub mod testing;
pub mod token;

pub use annotation::{Annotation, RuleKind};
pub use error::{Expectation, ParseRuleError, SyntaxError, UnknownRuleError};
pub use grammar::{parse, parse_rule, parse_start, RuleValue, StartRule};
pub use position::{Location, Position};
pub use token::{Operator, Pair, Token};
