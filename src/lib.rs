//! Parsing of proto3 schema source into a typed syntax tree.
//!
//! For whole files, see [`parse_file()`]. Any single grammar node can be
//! parsed with [`parse()`], or from an arbitrary [`TokenSource`] through the
//! [`Parse`] trait.
//!
//! Parsing is purely syntactic: names are not resolved, imports are not read
//! and field numbers are not checked for uniqueness. The first error aborts
//! parsing.
//!
//! # Examples
//!
//! ```
//! use protox_syntax::{ast, parse};
//!
//! let message: ast::Message = parse(
//!     r#"
//!     message Foo {
//!         repeated int32 ids = 1 [packed = true];
//!     }
//! "#,
//! )
//! .unwrap();
//! assert_eq!(message.name.text, "Foo");
//! assert!(message.def.fields[0].repeated);
//!
//! let err = parse::<ast::Syntax>(r#"syntax = "proto2";"#).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     r#"expected literal string "proto3", got "proto2" instead"#
//! );
//! ```
//!
//! ### Error messages
//!
//! [`ParseError`] implements [`miette::Diagnostic`], labelling the offending
//! token in the source. Use [`ParseError::with_source_code`] to attach a
//! file name.
//!
//! ### Features
//!
//! - `serde`: derives `Serialize` and `Deserialize` for [`Token`],
//!   [`TokenKind`] and every type in [`ast`]. Off by default; run the test
//!   suite with `--all-features` to include the JSON round trip.
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/protox-syntax/0.1.0/")]

pub mod ast;
mod error;
mod lex;
mod parse;
#[cfg(test)]
mod tests;

use tracing::debug;

pub use self::{
    error::ParseError,
    lex::{Lexer, Token, TokenKind},
    parse::{Cursor, Parse, TokenSource},
};

/// Parses a single grammar node of type `T` from the start of `source`.
///
/// Tokens after the end of the node are not examined.
pub fn parse<T: Parse>(source: &str) -> Result<T, ParseError> {
    debug!(len = source.len(), "parsing source");

    let mut cursor = Cursor::new(Lexer::new(source));
    T::parse(&mut cursor).map_err(|err| {
        debug!(error = %err, "parse failed");
        err.with_source_code(source.to_owned())
    })
}

/// Parses a complete proto3 source file.
///
/// The file must start with a `syntax = "proto3";` statement, followed by any
/// number of `import`, `package`, `option`, `message` and `enum` statements.
///
/// # Examples
///
/// ```
/// # use protox_syntax::parse_file;
/// let file = parse_file(
///     r#"
///     syntax = "proto3";
///     package com.example;
///     import public "dep.proto";
///
///     message Foo {
///         Bar bar = 1;
///     }
/// "#,
/// )
/// .unwrap();
/// assert_eq!(file.package.unwrap().name.to_string(), "com.example");
/// assert_eq!(file.imports[0].path.text, "\"dep.proto\"");
/// assert_eq!(file.messages[0].name.text, "Foo");
/// ```
pub fn parse_file(source: &str) -> Result<ast::File, ParseError> {
    parse(source)
}
