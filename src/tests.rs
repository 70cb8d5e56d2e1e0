use insta::assert_snapshot;
use miette::{Diagnostic, NamedSource};

use crate::{ast, parse, parse_file, ParseError};

fn error<T: crate::Parse + std::fmt::Debug>(source: &str) -> ParseError {
    parse::<T>(source).unwrap_err()
}

fn message<T: crate::Parse + std::fmt::Debug>(source: &str) -> String {
    error::<T>(source).to_string()
}

#[test]
fn syntax_errors() {
    assert_snapshot!(message::<ast::Syntax>(r#"syntax "proto3";"#), @r#"expected '=', got "proto3" instead"#);
    assert_snapshot!(message::<ast::Syntax>(r#"syntax = "proto2";"#), @r#"expected literal string "proto3", got "proto2" instead"#);
    assert_snapshot!(message::<ast::Syntax>(r#"syntax = "proto3""#), @"missing semicolon at the end of the syntax statement");
    assert_snapshot!(message::<ast::Syntax>("syntax = proto3;"), @r#"expected literal string "proto3", got a Identifier instead"#);
}

#[test]
fn import_errors() {
    assert_snapshot!(message::<ast::Import>(r#"import bytes "path";"#), @"expected imported package name, got bytes");
    assert_snapshot!(message::<ast::Import>(r#"import enum "path";"#), @"expected imported package name, got enum");
    assert_snapshot!(message::<ast::Import>("import public path;"), @"expected imported package name, got identifier (path)");
}

#[test]
fn identifier_errors() {
    assert_snapshot!(message::<ast::Package>(r#"package "foo";"#), @r#"expected identifier, got string literal ("foo")"#);
    assert_snapshot!(message::<ast::Package>("package"), @"expected identifier, got end of input");
}

#[test]
fn constant_errors() {
    assert_snapshot!(message::<ast::Option>("option java_package = syntax;"), @"expected a valid constant value, but got syntax");
    assert_snapshot!(message::<ast::Option>("option java_package = -foo;"), @"expected numeric literal, got foo instead");
}

#[test]
fn message_errors() {
    assert_snapshot!(message::<ast::Message>("message Foo { int32 id = 1 }"), @"expected ';', got } instead");
    assert_snapshot!(message::<ast::Message>("message Foo { oneof bar { repeated int32 id = 1; } }"), @"oneof fields cannot have labels");
    assert_snapshot!(message::<ast::Message>("message Foo { = }"), @"expected field type, got =");
    assert_snapshot!(message::<ast::Message>("message Foo {"), @"expected field type, got end of input");
}

#[test]
fn file_errors() {
    assert_snapshot!(parse_file(r#"syntax = "proto3"; rpc Foo;"#).unwrap_err().to_string(), @"expected 'import', 'package', 'option', 'message' or 'enum', got rpc instead");
    assert_snapshot!(parse_file(r#"syntax = "proto3"; package a; package b;"#).unwrap_err().to_string(), @"multiple package names specified");
    assert_snapshot!(parse_file("syntax = \"proto3\"; $").unwrap_err().to_string(), @"invalid token");
}

#[test]
fn nested_errors_are_not_rewritten() {
    let source = "message Outer { message Inner { enum E { A = x; } } }";
    assert_snapshot!(message::<ast::Message>(source), @"expected 'decimal literal', got x instead");
}

#[test]
fn error_span() {
    let source = r#"import public path;"#;
    let err = error::<ast::Import>(source);
    assert_eq!(err.span(), 14..18);
    assert_eq!(&source[err.span()], "path");
}

#[test]
fn error_labels() {
    let err = error::<ast::Package>("package 1;");
    let labels: Vec<_> = err.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].label(), Some("found here"));
    assert_eq!(labels[0].offset(), 8);
    assert_eq!(labels[0].len(), 1);
    assert!(err.source_code().is_some());
}

#[test]
fn error_with_named_source() {
    let source = "message Foo { int32 }";
    let err = parse_file(source)
        .unwrap_err()
        .with_source_code(NamedSource::new("foo.proto", source.to_owned()));
    assert_snapshot!(err.to_string(), @"expected 'syntax', got message instead");
    assert!(err.source_code().is_some());
}

#[test]
fn parse_complete_file() {
    let file = parse_file(
        r#"
        // leading comment
        syntax = "proto3";

        package com.example.foo;

        import public "other.proto";

        option java_package = "com.example.foo";

        enum EnumAllowingAlias {
            option allow_alias = true;
            UNKNOWN = 0;
            STARTED = 1;
            RUNNING = 2 [(custom_option) = "hello world"];
        }

        /* block
         * comment */
        message Outer {
            option (my_option).a = true;
            message Inner {
                int64 ival = 1;
            }
            repeated Inner inner_message = 2;
            EnumAllowingAlias enum_field = 3;
            oneof test_oneof {
                string name = 4;
                SubMessage sub_message = 9;
            }
        }
    "#,
    )
    .unwrap();

    assert_eq!(file.syntax.version(), "proto3");
    assert_eq!(
        file.package.as_ref().unwrap().name.to_string(),
        "com.example.foo"
    );
    assert_eq!(file.imports.len(), 1);
    assert_eq!(file.options.len(), 1);

    let enum_def = &file.enums[0].def;
    assert_eq!(enum_def.options.len(), 1);
    assert_eq!(enum_def.fields.len(), 3);
    assert!(matches!(
        enum_def.fields[2].options[0].name,
        ast::OptionName::Prefix { .. }
    ));

    let outer = &file.messages[0];
    assert_eq!(outer.name.text, "Outer");
    assert_eq!(outer.def.options.len(), 1);
    assert_eq!(outer.def.messages[0].name.text, "Inner");
    assert_eq!(outer.def.messages[0].def.fields[0].name.text, "ival");
    assert_eq!(outer.def.fields.len(), 2);
    assert!(outer.def.fields[0].repeated);
    assert_eq!(outer.def.one_ofs[0].fields.len(), 2);
    assert!(outer.def.one_ofs[0].fields.iter().all(|field| !field.repeated));
    assert!(!outer.def.is_empty());
}
