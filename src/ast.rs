//! The syntax tree produced by the parser.
//!
//! Nodes keep the tokens they were built from, so names and literals are
//! available exactly as written in the source. Every child node is owned by
//! value by its parent.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::lex::Token;

/// A whole proto3 source file.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct File {
    pub syntax: Syntax,
    pub package: std::option::Option<Package>,
    pub imports: Vec<Import>,
    pub options: Vec<Option>,
    pub messages: Vec<Message>,
    pub enums: Vec<Enum>,
}

/// A `syntax = "proto3";` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Syntax {
    pub value: Token,
}

/// An `import` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Import {
    pub path: Token,
    /// The `public` or `weak` keyword, if present.
    pub modifier: std::option::Option<Token>,
}

/// A `package` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Package {
    pub name: FullIdentifier,
}

/// A dotted name such as `com.example.Foo`.
///
/// Always holds at least one identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FullIdentifier {
    pub identifiers: Vec<Token>,
}

/// A number with an optional `+` or `-` sign.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignedNumber {
    pub sign: std::option::Option<Token>,
    /// A decimal or float literal.
    pub number: Token,
}

/// The value of an option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    String(Token),
    /// A reference such as `foo.BAR`, or one of the keywords `true` and `false`.
    Identifier(FullIdentifier),
    Number(SignedNumber),
}

/// The name of an option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OptionName {
    /// A plain name, such as `java_package`.
    Name(FullIdentifier),
    /// A parenthesized extension name, such as `(my.option).field`.
    Prefix {
        prefix: FullIdentifier,
        suffix: std::option::Option<FullIdentifier>,
    },
}

/// An option, either as an `option` statement or inside a bracketed list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Option {
    pub name: OptionName,
    pub value: Constant,
}

/// The type of a message field.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FieldType {
    /// One of the built-in scalar type keywords.
    Scalar(Token),
    /// The name of a message or enum type.
    Named(FullIdentifier),
    /// A fully-qualified type name written with a leading dot, such as
    /// `.foo.Bar`. The dot is not stored.
    Absolute(FullIdentifier),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Field {
    pub repeated: bool,
    pub ty: FieldType,
    pub name: Token,
    pub number: Token,
    pub options: Vec<Option>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumField {
    pub name: Token,
    pub number: SignedNumber,
    pub options: Vec<Option>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDef {
    pub options: Vec<Option>,
    pub fields: Vec<EnumField>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Enum {
    pub name: Token,
    pub def: EnumDef,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OneOf {
    pub name: Token,
    pub fields: Vec<Field>,
}

/// The body of a message. Each kind of member keeps its own declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MessageDef {
    pub fields: Vec<Field>,
    pub enums: Vec<Enum>,
    pub messages: Vec<Message>,
    pub one_ofs: Vec<OneOf>,
    pub options: Vec<Option>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Message {
    pub name: Token,
    pub def: MessageDef,
}

impl From<Token> for FullIdentifier {
    fn from(identifier: Token) -> Self {
        FullIdentifier {
            identifiers: vec![identifier],
        }
    }
}

impl From<Vec<Token>> for FullIdentifier {
    fn from(identifiers: Vec<Token>) -> Self {
        debug_assert!(!identifiers.is_empty());
        FullIdentifier { identifiers }
    }
}

impl fmt::Display for FullIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, identifier) in self.identifiers.iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            f.write_str(&identifier.text)?;
        }
        Ok(())
    }
}

impl Syntax {
    /// The syntax version, without quotes.
    pub fn version(&self) -> &str {
        self.value.text.trim_matches('"')
    }
}

impl MessageDef {
    /// Returns `true` if the body declares nothing.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
            && self.enums.is_empty()
            && self.messages.is_empty()
            && self.one_ofs.is_empty()
            && self.options.is_empty()
    }
}
