//! # searchq
//!
//! A parser for search bar query strings.
//!
//! A query is a whitespace-separated sequence of terms. A term is either a
//! structured pair (`status:published`, `number>=5`) or a free-text word
//! (`draft`, `"hello world"`). Parsing turns the raw string into an ordered
//! token sequence in which every token, and every sub-part of a pair, is
//! annotated with the exact input span it was read from.
//!
//! Entry points live in the [query] module; see [query::parse] and
//! [query::parse_rule].

pub mod query;
