//! Serialized token output keeps the documented field names.

use searchq::query::parse;
use serde_json::json;

#[test]
fn query_tokens_serialize_with_documented_fields() {
    let tokens = parse("draft").expect("input parses");
    let value = serde_json::to_value(&tokens).expect("tokens serialize");
    assert_eq!(
        value,
        json!([{
            "type": "Query",
            "text": "draft",
            "offset": 0,
            "length": 5,
            "end": 5,
            "content": "draft"
        }])
    );
}

#[test]
fn pair_tokens_nest_their_parts() {
    let tokens = parse("a>=2").expect("input parses");
    let value = serde_json::to_value(&tokens).expect("tokens serialize");
    assert_eq!(
        value,
        json!([{
            "type": "Pair",
            "text": "a>=2",
            "offset": 0,
            "length": 4,
            "end": 4,
            "content": {
                "key": {
                    "type": "Key",
                    "text": "a",
                    "offset": 0,
                    "length": 1,
                    "end": 1,
                    "content": "a"
                },
                "operator": {
                    "type": "Operator",
                    "text": ">=",
                    "offset": 1,
                    "length": 2,
                    "end": 3,
                    "content": ">="
                },
                "value": {
                    "type": "Value",
                    "text": "2",
                    "offset": 3,
                    "length": 1,
                    "end": 4,
                    "content": "2"
                }
            }
        }])
    );
}

#[test]
fn operators_serialize_as_their_spelling() {
    let tokens = parse("a!=b").expect("input parses");
    let value = serde_json::to_value(&tokens).expect("tokens serialize");
    assert_eq!(value[0]["content"]["operator"]["content"], json!("!="));
}
