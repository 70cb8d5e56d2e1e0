//! Tokens of the proto3 schema language and the scanner which produces them.


use std::fmt;

use logos::{FilterResult, Logos, Span};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The class of a [`Token`].
///
/// Every reserved word has its own kind, so `message` and `int32` are never
/// reported as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[logos(skip r"[\t\n\v\f\r ]+|//[^\n]*")]
#[logos(subpattern exponent = r"[eE][+\-]?[0-9]+")]
pub enum TokenKind {
    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    StringLiteral,
    #[regex("0|[1-9][0-9]*")]
    DecimalLiteral,
    #[regex(r#"[0-9]+\.[0-9]*(?&exponent)?"#)]
    #[regex(r#"[0-9]+(?&exponent)"#)]
    #[regex(r#"\.[0-9]+(?&exponent)?"#)]
    FloatLiteral,
    #[token("syntax")]
    Syntax,
    #[token("import")]
    Import,
    #[token("public")]
    Public,
    #[token("weak")]
    Weak,
    #[token("package")]
    Package,
    #[token("option")]
    Option,
    #[token("message")]
    Message,
    #[token("enum")]
    Enum,
    #[token("oneof")]
    Oneof,
    #[token("repeated")]
    Repeated,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("double")]
    Double,
    #[token("float")]
    Float,
    #[token("int32")]
    Int32,
    #[token("int64")]
    Int64,
    #[token("uint32")]
    Uint32,
    #[token("uint64")]
    Uint64,
    #[token("sint32")]
    Sint32,
    #[token("sint64")]
    Sint64,
    #[token("fixed32")]
    Fixed32,
    #[token("fixed64")]
    Fixed64,
    #[token("sfixed32")]
    Sfixed32,
    #[token("sfixed64")]
    Sfixed64,
    #[token("bool")]
    Bool,
    #[token("string")]
    String,
    #[token("bytes")]
    Bytes,
    #[token("=")]
    Equals,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    /// Never produced: block comments are skipped, and an unterminated one
    /// is an error.
    #[doc(hidden)]
    #[token("/*", block_comment)]
    BlockComment,
}

fn block_comment(lex: &mut logos::Lexer<'_, TokenKind>) -> FilterResult<(), ()> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

impl TokenKind {
    /// The fixed source text of this kind, or `None` for identifiers and literals.
    pub fn as_str(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Identifier
            | TokenKind::StringLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::FloatLiteral
            | TokenKind::BlockComment => return None,
            TokenKind::Syntax => "syntax",
            TokenKind::Import => "import",
            TokenKind::Public => "public",
            TokenKind::Weak => "weak",
            TokenKind::Package => "package",
            TokenKind::Option => "option",
            TokenKind::Message => "message",
            TokenKind::Enum => "enum",
            TokenKind::Oneof => "oneof",
            TokenKind::Repeated => "repeated",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Double => "double",
            TokenKind::Float => "float",
            TokenKind::Int32 => "int32",
            TokenKind::Int64 => "int64",
            TokenKind::Uint32 => "uint32",
            TokenKind::Uint64 => "uint64",
            TokenKind::Sint32 => "sint32",
            TokenKind::Sint64 => "sint64",
            TokenKind::Fixed32 => "fixed32",
            TokenKind::Fixed64 => "fixed64",
            TokenKind::Sfixed32 => "sfixed32",
            TokenKind::Sfixed64 => "sfixed64",
            TokenKind::Bool => "bool",
            TokenKind::String => "string",
            TokenKind::Bytes => "bytes",
            TokenKind::Equals => "=",
            TokenKind::Semicolon => ";",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::LeftBracket => "[",
            TokenKind::RightBracket => "]",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
        })
    }

    /// Returns `true` for the built-in scalar field types.
    pub fn is_scalar_type(self) -> bool {
        matches!(
            self,
            TokenKind::Double
                | TokenKind::Float
                | TokenKind::Int32
                | TokenKind::Int64
                | TokenKind::Uint32
                | TokenKind::Uint64
                | TokenKind::Sint32
                | TokenKind::Sint64
                | TokenKind::Fixed32
                | TokenKind::Fixed64
                | TokenKind::Sfixed32
                | TokenKind::Sfixed64
                | TokenKind::Bool
                | TokenKind::String
                | TokenKind::Bytes
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::StringLiteral => write!(f, "string literal"),
            TokenKind::DecimalLiteral => write!(f, "decimal literal"),
            TokenKind::FloatLiteral => write!(f, "float literal"),
            TokenKind::BlockComment => write!(f, "comment"),
            kind => f.write_str(kind.as_str().unwrap_or_default()),
        }
    }
}

/// A classified lexical unit together with its source text.
///
/// String literals keep their surrounding quotes, so the text of `"proto3"`
/// is eight characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// Creates a token of the given kind and text.
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    /// Describes this token for error messages: identifiers and literals are
    /// shown with their class, keywords and punctuation as their bare text.
    pub fn description(&self) -> String {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::StringLiteral
            | TokenKind::DecimalLiteral
            | TokenKind::FloatLiteral => format!("{} ({})", self.kind, self.text),
            _ => self.text.clone(),
        }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token::new(kind, kind.as_str().unwrap_or_default())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Splits proto3 source text into tokens.
///
/// Whitespace and comments are skipped. Input which matches no token is
/// yielded as `Err` with its span.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            inner: TokenKind::lexer(source),
        }
    }
}

impl fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("span", &self.inner.span())
            .finish_non_exhaustive()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(Token, Span), Span>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let span = self.inner.span();
        Some(match kind {
            Ok(kind) => Ok((Token::new(kind, self.inner.slice()), span)),
            Err(()) => Err(span),
        })
    }
}
