//! One function per grammar rule.
//!
//! Every rule takes the position to start from and a `quiet` flag, and
//! returns the position after its match plus the parsed value. `quiet`
//! suppresses expectation recording; it is raised inside named rules (so
//! only the rule's name surfaces when it fails as a whole) and inside
//! syntactic lookaheads (which never record anything).

use crate::query::annotation::{Annotation, RuleKind};
use crate::query::error::{ClassPart, Expectation};
use crate::query::token::{Operator, Pair, Token};

use super::engine::{CharClass, Parser};

/// `[A-Za-z0-9_-]`, the key alphabet.
const KEY_CHAR: CharClass = CharClass::new(
    &[
        ClassPart::Range('A', 'Z'),
        ClassPart::Range('a', 'z'),
        ClassPart::Range('0', '9'),
        ClassPart::Single('_'),
        ClassPart::Single('-'),
    ],
    false,
);

/// `[<>!=]`, first character of a two-character relational operator.
const RELATIONAL_FIRST: CharClass = CharClass::new(
    &[
        ClassPart::Single('<'),
        ClassPart::Single('>'),
        ClassPart::Single('!'),
        ClassPart::Single('='),
    ],
    false,
);

/// `[=]`, second character of a two-character relational operator.
const EQUALS: CharClass = CharClass::new(&[ClassPart::Single('=')], false);

/// `[<>]`, a bare angle operator.
const ANGLE: CharClass = CharClass::new(&[ClassPart::Single('<'), ClassPart::Single('>')], false);

/// `[^"]`, quoted content.
const NOT_QUOTE: CharClass = CharClass::new(&[ClassPart::Single('"')], true);

/// `[^ "]`, bare term content.
const BARE_CHAR: CharClass =
    CharClass::new(&[ClassPart::Single(' '), ClassPart::Single('"')], true);

/// `[ \t]`, inline whitespace.
const WS_CHAR: CharClass =
    CharClass::new(&[ClassPart::Single(' '), ClassPart::Single('\t')], false);

impl<'a> Parser<'a> {
    /// Search := WS Token* WS
    ///
    /// Tokens consume their own trailing whitespace, so the loop needs no
    /// separator; it stops at the first position where neither a Pair nor
    /// a Query matches.
    pub(crate) fn search(&mut self, pos: usize, quiet: bool) -> Option<(usize, Vec<Token>)> {
        let mut pos = self.ws(pos);
        let mut tokens = Vec::new();
        while let Some((next, token)) = self.token(pos, quiet) {
            tokens.push(token);
            pos = next;
        }
        pos = self.ws(pos);
        Some((pos, tokens))
    }

    /// Token := Pair | Query
    pub(crate) fn token(&mut self, pos: usize, quiet: bool) -> Option<(usize, Token)> {
        if let Some((next, pair)) = self.pair(pos, quiet) {
            return Some((next, Token::Pair(pair)));
        }
        let (next, query) = self.query(pos, quiet)?;
        Some((next, Token::Query(query)))
    }

    /// Pair := Key Operator Value
    pub(crate) fn pair(&mut self, pos: usize, quiet: bool) -> Option<(usize, Annotation<Pair>)> {
        let start = pos;
        let (pos, key) = self.key(pos, quiet)?;
        let (pos, operator) = self.operator(pos, quiet)?;
        let (pos, value) = self.value(pos, quiet)?;
        let content = Pair {
            key,
            operator,
            value,
        };
        Some((pos, self.annotate(RuleKind::Pair, start, pos, content)))
    }

    /// Key := [A-Za-z0-9_-]+ WS
    pub(crate) fn key(&mut self, pos: usize, quiet: bool) -> Option<(usize, Annotation<String>)> {
        let start = pos;
        let mut end = self.class(pos, &KEY_CHAR, quiet)?;
        while let Some(next) = self.class(end, &KEY_CHAR, quiet) {
            end = next;
        }
        let name = self.slice(start, end).to_string();
        let pos = self.ws(end);
        Some((pos, self.annotate(RuleKind::Key, start, pos, name)))
    }

    /// Operator := (":" | [<>!=][=] | "=" | [<>]) WS
    ///
    /// Alternative order matters: `:` first, then the two-character
    /// relational forms, then bare `=`, then bare `<` or `>`. A lone `!`
    /// matches none of them, so the enclosing Pair fails and the term
    /// re-parses as a Query.
    pub(crate) fn operator(
        &mut self,
        pos: usize,
        quiet: bool,
    ) -> Option<(usize, Annotation<Operator>)> {
        let start = pos;
        let (end, op) = self.operator_symbol(pos, quiet)?;
        let pos = self.ws(end);
        Some((pos, self.annotate(RuleKind::Operator, start, pos, op)))
    }

    fn operator_symbol(&mut self, pos: usize, quiet: bool) -> Option<(usize, Operator)> {
        if let Some(end) = self.literal(pos, ":", quiet) {
            return Some((end, Operator::Colon));
        }
        if let Some(mid) = self.class(pos, &RELATIONAL_FIRST, quiet) {
            if let Some(end) = self.class(mid, &EQUALS, quiet) {
                let op = match self.slice(pos, mid) {
                    "<" => Operator::Le,
                    ">" => Operator::Ge,
                    "!" => Operator::Ne,
                    // "==" reads as equality; the annotation text keeps the
                    // raw spelling
                    _ => Operator::Eq,
                };
                return Some((end, op));
            }
        }
        if let Some(end) = self.literal(pos, "=", quiet) {
            return Some((end, Operator::Eq));
        }
        if let Some(end) = self.class(pos, &ANGLE, quiet) {
            let op = match self.slice(pos, end) {
                "<" => Operator::Lt,
                _ => Operator::Gt,
            };
            return Some((end, op));
        }
        None
    }

    /// Value := QuotedOrBareExpr WS | Novalue
    pub(crate) fn value(&mut self, pos: usize, quiet: bool) -> Option<(usize, Annotation<String>)> {
        let start = pos;
        if let Some((end, text)) = self.quoted_or_bare(pos, quiet) {
            let pos = self.ws(end);
            return Some((pos, self.annotate(RuleKind::Value, start, pos, text)));
        }
        let pos = self.novalue(pos)?;
        Some((pos, self.annotate(RuleKind::Value, start, pos, String::new())))
    }

    /// Query := QuotedOrBareExpr WS
    pub(crate) fn query(&mut self, pos: usize, quiet: bool) -> Option<(usize, Annotation<String>)> {
        let start = pos;
        let (end, text) = self.quoted_or_bare(pos, quiet)?;
        let pos = self.ws(end);
        Some((pos, self.annotate(RuleKind::Query, start, pos, text)))
    }

    /// QuotedOrBareExpr := '"' [^"]* ('"' | EOF) | [^ "]+
    fn quoted_or_bare(&mut self, pos: usize, quiet: bool) -> Option<(usize, String)> {
        if let Some(matched) = self.quoted(pos, quiet) {
            return Some(matched);
        }
        self.bare(pos, quiet)
    }

    /// The closing quote is optional when the input ends right after the
    /// content: an unterminated quote at end of input is tolerated.
    fn quoted(&mut self, pos: usize, quiet: bool) -> Option<(usize, String)> {
        let content_start = self.literal(pos, "\"", quiet)?;
        let mut content_end = content_start;
        while let Some(next) = self.class(content_end, &NOT_QUOTE, quiet) {
            content_end = next;
        }
        let content = self.slice(content_start, content_end).to_string();
        if let Some(end) = self.literal(content_end, "\"", quiet) {
            return Some((end, content));
        }
        self.eof(content_end, quiet)?;
        Some((content_end, content))
    }

    fn bare(&mut self, pos: usize, quiet: bool) -> Option<(usize, String)> {
        let start = pos;
        let mut end = self.class(pos, &BARE_CHAR, quiet)?;
        while let Some(next) = self.class(end, &BARE_CHAR, quiet) {
            end = next;
        }
        Some((end, self.slice(start, end).to_string()))
    }

    /// Novalue := &(WS1 | EOL)
    ///
    /// Zero-width: the value is omitted when whitespace or the end of a
    /// line follows the operator immediately. Syntactic lookahead, so
    /// nothing inside it records expectations.
    fn novalue(&mut self, pos: usize) -> Option<usize> {
        if self.ws1(pos, true).is_some() || self.eol(pos, true).is_some() {
            Some(pos)
        } else {
            None
        }
    }

    /// WS := [ \t]*
    ///
    /// Cannot fail; its probes stay silent so the stop position never
    /// pollutes the expectation set.
    pub(crate) fn ws(&mut self, mut pos: usize) -> usize {
        while let Some(next) = self.class(pos, &WS_CHAR, true) {
            pos = next;
        }
        pos
    }

    /// WS1 := [ \t]+, named "whitespace".
    pub(crate) fn ws1(&mut self, pos: usize, quiet: bool) -> Option<usize> {
        let mut end = match self.class(pos, &WS_CHAR, true) {
            Some(next) => next,
            None => {
                self.fail(pos, quiet, Expectation::other("whitespace"));
                return None;
            }
        };
        while let Some(next) = self.class(end, &WS_CHAR, true) {
            end = next;
        }
        Some(end)
    }

    /// EOL := "\r\n" | "\n\r" | "\r" | "\n" | EOF, named "EOL".
    pub(crate) fn eol(&mut self, pos: usize, quiet: bool) -> Option<usize> {
        for newline in ["\r\n", "\n\r", "\r", "\n"] {
            if let Some(end) = self.literal(pos, newline, true) {
                return Some(end);
            }
        }
        if self.eof(pos, true).is_some() {
            return Some(pos);
        }
        self.fail(pos, quiet, Expectation::other("EOL"));
        None
    }

    /// EOF := !any. Zero-width, named "EOF".
    pub(crate) fn eof(&mut self, pos: usize, quiet: bool) -> Option<usize> {
        if self.any(pos, true).is_some() {
            self.fail(pos, quiet, Expectation::other("EOF"));
            None
        } else {
            Some(pos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_symbols_map_to_their_variants() {
        let cases = [
            (":x", Operator::Colon, 1),
            ("=x", Operator::Eq, 1),
            ("<x", Operator::Lt, 1),
            (">x", Operator::Gt, 1),
            ("<=x", Operator::Le, 2),
            (">=x", Operator::Ge, 2),
            ("!=x", Operator::Ne, 2),
            ("==x", Operator::Eq, 2),
        ];
        for (input, expected, end) in cases {
            let mut parser = Parser::new(input);
            assert_eq!(
                parser.operator_symbol(0, false),
                Some((end, expected)),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn a_lone_bang_is_not_an_operator() {
        let mut parser = Parser::new("!b");
        assert_eq!(parser.operator_symbol(0, false), None);
        // the furthest failure is the missing "=" after "!"
        let (pos, expected) = parser.furthest_failure();
        assert_eq!(pos, 1);
        assert_eq!(
            expected,
            &[Expectation::Class {
                parts: vec![ClassPart::Single('=')],
                inverted: false,
            }]
        );
    }

    #[test]
    fn named_rules_surface_their_name_only() {
        let mut parser = Parser::new("x");
        assert!(parser.ws1(0, false).is_none());
        let (pos, expected) = parser.furthest_failure();
        assert_eq!(pos, 0);
        assert_eq!(expected, &[Expectation::other("whitespace")]);
    }

    #[test]
    fn eol_accepts_every_newline_form_and_eof() {
        for (input, end) in [("\r\nx", 2), ("\n\rx", 2), ("\rx", 1), ("\nx", 1), ("", 0)] {
            let mut parser = Parser::new(input);
            assert_eq!(parser.eol(0, false), Some(end), "input {:?}", input);
        }
        let mut parser = Parser::new("x");
        assert_eq!(parser.eol(0, false), None);
        let (_, expected) = parser.furthest_failure();
        assert_eq!(expected, &[Expectation::other("EOL")]);
    }

    #[test]
    fn eof_is_zero_width() {
        let mut parser = Parser::new("");
        assert_eq!(parser.eof(0, false), Some(0));

        let mut parser = Parser::new("x");
        assert_eq!(parser.eof(0, false), None);
        let (_, expected) = parser.furthest_failure();
        assert_eq!(expected, &[Expectation::other("EOF")]);
    }

    #[test]
    fn novalue_requires_whitespace_or_line_end() {
        for input in [" x", "\tx", "\nrest", "\r\nrest", ""] {
            let mut parser = Parser::new(input);
            assert_eq!(parser.novalue(0), Some(0), "input {:?}", input);
        }
        let mut parser = Parser::new("x");
        assert_eq!(parser.novalue(0), None);
        // lookahead failures leave no trace
        let (pos, expected) = parser.furthest_failure();
        assert_eq!((pos, expected.len()), (0, 0));
    }

    #[test]
    fn key_consumes_trailing_whitespace_but_keeps_the_name_clean() {
        let mut parser = Parser::new("status  :");
        let (pos, key) = parser.key(0, false).expect("key should match");
        assert_eq!(pos, 8);
        assert_eq!(key.content, "status");
        assert_eq!(key.text, "status  ");
        assert_eq!((key.offset, key.end), (0, 8));
    }

    #[test]
    fn quoted_content_stops_at_the_closing_quote() {
        let mut parser = Parser::new("\"a b\"c");
        assert_eq!(parser.quoted(0, false), Some((5, "a b".to_string())));
    }

    #[test]
    fn unterminated_quote_is_tolerated_at_end_of_input() {
        let mut parser = Parser::new("\"a b");
        assert_eq!(parser.quoted(0, false), Some((4, "a b".to_string())));
    }

    #[test]
    fn bare_runs_stop_at_spaces_and_quotes() {
        let mut parser = Parser::new("a!b\"c");
        assert_eq!(parser.bare(0, false), Some((3, "a!b".to_string())));

        let mut parser = Parser::new("a b");
        assert_eq!(parser.bare(0, false), Some((1, "a".to_string())));
    }
}
