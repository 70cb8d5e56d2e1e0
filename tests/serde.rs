use protox_syntax::{ast, parse_file};

const SOURCE: &str = r#"
syntax = "proto3";
package foo.bar;

enum Status {
    UNKNOWN = 0;
    ACTIVE = 1 [deprecated = true];
}

message Request {
    string id = 1;
    repeated Status statuses = 2;
    oneof payload {
        bytes raw = 3;
        .foo.bar.Nested nested = 4;
    }
}
"#;

#[test]
fn file_round_trip() {
    let file = parse_file(SOURCE).unwrap();

    let json = serde_json::to_string(&file).unwrap();
    let decoded: ast::File = serde_json::from_str(&json).unwrap();

    similar_asserts::assert_eq!(file, decoded);
}

#[test]
fn token_kind_is_serialized_by_name() {
    let file = parse_file(SOURCE).unwrap();

    let value = serde_json::to_value(&file.messages[0].def.fields[0].ty).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "Scalar": { "kind": "String", "text": "string" } })
    );
}
