//! Property-based tests over the full query grammar.

use proptest::prelude::*;
use searchq::query::testing::{assert_span_consistency, pair, query, summarize};
use searchq::query::{parse, Operator};

proptest! {
    /// Strings of spaces and tabs, including the empty string, are valid
    /// queries with no tokens.
    #[test]
    fn whitespace_only_inputs_parse_to_nothing(input in "[ \t]*") {
        let tokens = parse(&input).expect("whitespace-only input parses");
        prop_assert!(tokens.is_empty());
    }

    /// The default entry point accepts anything: bare terms absorb every
    /// character that is not a space or a quote, and quoted runs are
    /// terminated by a quote or the end of the input. Every annotation of
    /// every result covers exactly the text it claims to.
    #[test]
    fn parsing_any_string_succeeds_with_consistent_spans(input in any::<String>()) {
        let result = parse(&input);
        prop_assert!(result.is_ok(), "parse failed: {:?}", result);
        let tokens = result.expect("checked above");
        assert_span_consistency(&input, &tokens);
    }

    /// Tokens are contiguous: each starts where the previous one ended,
    /// the first starts right after the leading whitespace, and the last
    /// ends at the end of the input.
    #[test]
    fn tokens_tile_the_input(input in any::<String>()) {
        let tokens = parse(&input).expect("default entry is total");
        match tokens.first() {
            Some(first) => {
                prop_assert!(input[..first.offset()]
                    .chars()
                    .all(|c| c == ' ' || c == '\t'));
                let last = tokens.last().expect("nonempty");
                prop_assert_eq!(last.end(), input.len());
            }
            None => {
                prop_assert!(input.chars().all(|c| c == ' ' || c == '\t'));
            }
        }
        for window in tokens.windows(2) {
            prop_assert_eq!(window[0].end(), window[1].offset());
        }
    }

    /// A generated `key operator value` string parses back into exactly
    /// that pair. The value alphabet avoids `=`: a leading `=` would fuse
    /// with a relational operator into its two-character form.
    #[test]
    fn generated_pairs_round_trip(
        key in "[A-Za-z0-9_-]{1,12}",
        op_index in 0usize..7,
        value in "[A-Za-z0-9_:!#&%.,*+?<>-]{0,12}",
    ) {
        let operators = [
            Operator::Colon,
            Operator::Eq,
            Operator::Lt,
            Operator::Gt,
            Operator::Le,
            Operator::Ge,
            Operator::Ne,
        ];
        let operator = operators[op_index];
        let input = format!("{}{}{}", key, operator.as_str(), value);
        let tokens = parse(&input).expect("generated pair parses");
        assert_span_consistency(&input, &tokens);
        prop_assert_eq!(summarize(&tokens), vec![pair(&key, operator, &value)]);
    }

    /// Quoted content round-trips whether or not the closing quote is
    /// present at the end of the input.
    #[test]
    fn quoted_queries_round_trip(content in "[^\"]{0,20}") {
        let closed = format!("\"{}\"", content);
        let tokens = parse(&closed).expect("closed quote parses");
        assert_span_consistency(&closed, &tokens);
        prop_assert_eq!(summarize(&tokens), vec![query(&content)]);

        let unterminated = format!("\"{}", content);
        let tokens = parse(&unterminated).expect("unterminated quote parses");
        assert_span_consistency(&unterminated, &tokens);
        prop_assert_eq!(summarize(&tokens), vec![query(&content)]);
    }
}
