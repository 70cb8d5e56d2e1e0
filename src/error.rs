use std::{fmt, sync::Arc};

use logos::Span;
use miette::{Diagnostic, SourceCode};
use thiserror::Error;

use crate::lex::TokenKind;

/// Stands in for the found token in error messages once the input is exhausted.
pub(crate) const END_OF_INPUT: &str = "end of input";

/// An error that may occur while parsing proto3 source.
///
/// The [`Display`](fmt::Display) output is a single line naming what was
/// expected and what was found. The [`Diagnostic`] implementation adds a label
/// pointing at the offending token.
#[derive(Error, Diagnostic)]
#[error("{}", kind)]
#[diagnostic(forward(kind))]
pub struct ParseError {
    pub(crate) kind: Box<ParseErrorKind>,
    #[source_code]
    source_code: Arc<dyn SourceCode>,
}

#[derive(Error, Debug, Diagnostic, PartialEq, Eq)]
pub(crate) enum ParseErrorKind {
    #[error("invalid token")]
    InvalidToken {
        #[label("found here")]
        span: Span,
    },
    #[error("expected '{expected}', got {found} instead")]
    UnexpectedToken {
        expected: TokenKind,
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("expected literal string \"proto3\", got {found} instead")]
    UnknownSyntax {
        found: String,
        #[label("defined here")]
        span: Span,
    },
    #[error("expected literal string \"proto3\", got a {kind} instead")]
    InvalidSyntaxKind {
        kind: String,
        #[label("found here")]
        span: Span,
    },
    #[error("missing semicolon at the end of the syntax statement")]
    MissingSyntaxSemicolon {
        #[label("expected ';' here")]
        span: Span,
    },
    #[error("expected imported package name, got {found}")]
    #[diagnostic(help("the imported file name must be a quoted string"))]
    InvalidImport {
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("expected identifier, got {found}")]
    ExpectedIdentifier {
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("expected a valid constant value, but got {found}")]
    InvalidConstant {
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("expected numeric literal, got {found} instead")]
    ExpectedNumber {
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("expected field type, got {found}")]
    InvalidFieldType {
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("oneof fields cannot have labels")]
    OneofFieldWithLabel {
        #[label("defined here")]
        span: Span,
    },
    #[error("expected 'import', 'package', 'option', 'message' or 'enum', got {found} instead")]
    InvalidStatement {
        found: String,
        #[label("found here")]
        span: Span,
    },
    #[error("multiple package names specified")]
    DuplicatePackage {
        #[label("defined here…")]
        first: Span,
        #[label("…and again here")]
        second: Span,
    },
}

impl ParseError {
    /// Override the source code for this error.
    ///
    /// Errors from [`parse`](crate::parse) carry the parsed text already. Errors
    /// produced from a hand-built token stream carry none, and spans refer to
    /// whatever text the tokens came from.
    ///
    /// # Examples
    ///
    /// ```
    /// # use miette::NamedSource;
    /// # use protox_syntax::{ast, ParseError};
    /// #
    /// fn parse_with_name(file_name: String, source: String) -> Result<ast::File, ParseError> {
    ///     protox_syntax::parse_file(&source)
    ///         .map_err(|err| err.with_source_code(NamedSource::new(file_name, source)))
    /// }
    /// ```
    pub fn with_source_code<S>(self, source: S) -> Self
    where
        S: SourceCode + 'static,
    {
        ParseError {
            kind: self.kind,
            source_code: Arc::new(source),
        }
    }

    /// The byte range of the token which caused this error.
    pub fn span(&self) -> Span {
        match &*self.kind {
            ParseErrorKind::InvalidToken { span }
            | ParseErrorKind::UnexpectedToken { span, .. }
            | ParseErrorKind::UnknownSyntax { span, .. }
            | ParseErrorKind::InvalidSyntaxKind { span, .. }
            | ParseErrorKind::MissingSyntaxSemicolon { span }
            | ParseErrorKind::InvalidImport { span, .. }
            | ParseErrorKind::ExpectedIdentifier { span, .. }
            | ParseErrorKind::InvalidConstant { span, .. }
            | ParseErrorKind::ExpectedNumber { span, .. }
            | ParseErrorKind::InvalidFieldType { span, .. }
            | ParseErrorKind::OneofFieldWithLabel { span }
            | ParseErrorKind::InvalidStatement { span, .. } => span.clone(),
            ParseErrorKind::DuplicatePackage { second, .. } => second.clone(),
        }
    }
}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> Self {
        ParseError {
            kind: Box::new(kind),
            source_code: Arc::new(String::new()),
        }
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.kind, f)
    }
}
