mod cursor;

use logos::Span;
use tracing::trace;

pub use self::cursor::{Cursor, TokenSource};
use crate::{
    ast,
    error::{ParseError, ParseErrorKind},
    lex::{Token, TokenKind},
};

/// A grammar node which can be parsed from a [`Cursor`].
pub trait Parse: Sized {
    /// Parses one node starting at the next token of `cursor`.
    ///
    /// Exactly the tokens belonging to the node are consumed, including its
    /// terminating `;` or `}`. Parsing stops at the first error.
    fn parse<S: TokenSource>(cursor: &mut Cursor<S>) -> Result<Self, ParseError>;
}

macro_rules! impl_parse {
    ($($ty:ty => $method:ident,)*) => {
        $(
            impl Parse for $ty {
                fn parse<S: TokenSource>(cursor: &mut Cursor<S>) -> Result<Self, ParseError> {
                    Parser::new(cursor).$method()
                }
            }
        )*
    };
}

impl_parse! {
    ast::File => parse_file,
    ast::Syntax => parse_syntax,
    ast::Import => parse_import,
    ast::Package => parse_package,
    ast::Option => parse_option,
    ast::FullIdentifier => parse_full_ident,
    ast::Constant => parse_constant,
    ast::SignedNumber => parse_signed_number,
    ast::Field => parse_field,
    ast::EnumField => parse_enum_field,
    ast::Enum => parse_enum,
    ast::OneOf => parse_oneof,
    ast::Message => parse_message,
}

struct Parser<'a, S> {
    cursor: &'a mut Cursor<S>,
}

impl<'a, S: TokenSource> Parser<'a, S> {
    fn new(cursor: &'a mut Cursor<S>) -> Self {
        Parser { cursor }
    }

    fn parse_file(&mut self) -> Result<ast::File, ParseError> {
        let syntax = self.parse_syntax()?;

        let mut package: Option<(ast::Package, Span)> = None;
        let mut imports = Vec::new();
        let mut options = Vec::new();
        let mut messages = Vec::new();
        let mut enums = Vec::new();

        loop {
            match self.cursor.peek_kind()? {
                Some(TokenKind::Semicolon) => {
                    self.cursor.bump();
                }
                Some(TokenKind::Import) => imports.push(self.parse_import()?),
                Some(TokenKind::Package) => {
                    let span = self.cursor.span();
                    let parsed = self.parse_package()?;
                    if let Some((_, first)) = &package {
                        return Err(ParseErrorKind::DuplicatePackage {
                            first: first.clone(),
                            second: span,
                        }
                        .into());
                    }
                    package = Some((parsed, span));
                }
                Some(TokenKind::Option) => options.push(self.parse_option()?),
                Some(TokenKind::Message) => messages.push(self.parse_message()?),
                Some(TokenKind::Enum) => enums.push(self.parse_enum()?),
                Some(_) => {
                    return Err(self
                        .cursor
                        .error(|found, span| ParseErrorKind::InvalidStatement { found, span }))
                }
                None => break,
            }
        }

        Ok(ast::File {
            syntax,
            package: package.map(|(package, _)| package),
            imports,
            options,
            messages,
            enums,
        })
    }

    fn parse_syntax(&mut self) -> Result<ast::Syntax, ParseError> {
        self.cursor.expect(TokenKind::Syntax)?;
        self.cursor.expect(TokenKind::Equals)?;

        let (kind, is_proto3) = match self.cursor.peek()? {
            Some(tok) => (Some(tok.kind), tok.text == "\"proto3\""),
            None => (None, false),
        };
        let value = match kind {
            Some(TokenKind::StringLiteral) if is_proto3 => self.cursor.bump(),
            Some(TokenKind::StringLiteral) | None => {
                return Err(self
                    .cursor
                    .error(|found, span| ParseErrorKind::UnknownSyntax { found, span }))
            }
            Some(kind) => {
                return Err(ParseErrorKind::InvalidSyntaxKind {
                    kind: format!("{:?}", kind),
                    span: self.cursor.span(),
                }
                .into())
            }
        };

        match self.cursor.peek_kind()? {
            Some(TokenKind::Semicolon) => {
                self.cursor.bump();
            }
            _ => {
                return Err(ParseErrorKind::MissingSyntaxSemicolon {
                    span: self.cursor.span(),
                }
                .into())
            }
        }

        Ok(ast::Syntax { value })
    }

    fn parse_import(&mut self) -> Result<ast::Import, ParseError> {
        self.cursor.expect(TokenKind::Import)?;

        let modifier = match self.cursor.peek_kind()? {
            Some(TokenKind::Public | TokenKind::Weak) => Some(self.cursor.bump()),
            _ => None,
        };

        let path = match self.cursor.peek_kind()? {
            Some(TokenKind::StringLiteral) => self.cursor.bump(),
            _ => {
                return Err(self
                    .cursor
                    .describe_error(|found, span| ParseErrorKind::InvalidImport { found, span }))
            }
        };

        self.cursor.expect(TokenKind::Semicolon)?;

        Ok(ast::Import { path, modifier })
    }

    fn parse_package(&mut self) -> Result<ast::Package, ParseError> {
        self.cursor.expect(TokenKind::Package)?;

        let name = self.parse_full_ident()?;

        self.cursor.expect(TokenKind::Semicolon)?;

        Ok(ast::Package { name })
    }

    fn parse_option(&mut self) -> Result<ast::Option, ParseError> {
        self.cursor.expect(TokenKind::Option)?;

        let option = self.parse_option_body()?;

        self.cursor.expect(TokenKind::Semicolon)?;

        Ok(option)
    }

    fn parse_option_body(&mut self) -> Result<ast::Option, ParseError> {
        let name = match self.cursor.peek_kind()? {
            Some(TokenKind::LeftParen) => {
                self.cursor.bump();
                let prefix = self.parse_full_ident()?;
                self.cursor.expect(TokenKind::RightParen)?;

                let suffix = match self.cursor.bump_if(TokenKind::Dot)? {
                    Some(_) => Some(self.parse_full_ident()?),
                    None => None,
                };

                ast::OptionName::Prefix { prefix, suffix }
            }
            _ => ast::OptionName::Name(self.parse_full_ident()?),
        };

        self.cursor.expect(TokenKind::Equals)?;

        let value = self.parse_constant()?;

        Ok(ast::Option { name, value })
    }

    /// Parses an optional bracketed option list: `[a = 1, (b) = "c"]`.
    fn parse_options_list(&mut self) -> Result<Vec<ast::Option>, ParseError> {
        if self.cursor.bump_if(TokenKind::LeftBracket)?.is_none() {
            return Ok(vec![]);
        }

        let mut options = vec![self.parse_option_body()?];
        loop {
            match self.cursor.peek_kind()? {
                Some(TokenKind::Comma) => {
                    self.cursor.bump();
                    options.push(self.parse_option_body()?);
                }
                _ => {
                    self.cursor.expect(TokenKind::RightBracket)?;
                    break;
                }
            }
        }

        Ok(options)
    }

    fn parse_constant(&mut self) -> Result<ast::Constant, ParseError> {
        match self.cursor.peek_kind()? {
            Some(TokenKind::StringLiteral) => Ok(ast::Constant::String(self.cursor.bump())),
            Some(
                TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::DecimalLiteral
                | TokenKind::FloatLiteral,
            ) => Ok(ast::Constant::Number(self.parse_signed_number()?)),
            Some(TokenKind::True | TokenKind::False) => Ok(ast::Constant::Identifier(
                ast::FullIdentifier::from(self.cursor.bump()),
            )),
            Some(TokenKind::Identifier) => Ok(ast::Constant::Identifier(self.parse_full_ident()?)),
            _ => Err(self
                .cursor
                .error(|found, span| ParseErrorKind::InvalidConstant { found, span })),
        }
    }

    fn parse_signed_number(&mut self) -> Result<ast::SignedNumber, ParseError> {
        let sign = self.parse_sign()?;

        let number = match self.cursor.peek_kind()? {
            Some(TokenKind::DecimalLiteral | TokenKind::FloatLiteral) => self.cursor.bump(),
            _ => {
                return Err(self
                    .cursor
                    .error(|found, span| ParseErrorKind::ExpectedNumber { found, span }))
            }
        };

        Ok(ast::SignedNumber { sign, number })
    }

    fn parse_sign(&mut self) -> Result<Option<Token>, ParseError> {
        match self.cursor.peek_kind()? {
            Some(TokenKind::Plus | TokenKind::Minus) => Ok(Some(self.cursor.bump())),
            _ => Ok(None),
        }
    }

    fn parse_full_ident(&mut self) -> Result<ast::FullIdentifier, ParseError> {
        let mut identifiers = vec![self.parse_ident()?];

        while self.cursor.bump_if(TokenKind::Dot)?.is_some() {
            identifiers.push(self.parse_ident()?);
        }

        Ok(ast::FullIdentifier::from(identifiers))
    }

    fn parse_ident(&mut self) -> Result<Token, ParseError> {
        match self.cursor.peek_kind()? {
            Some(TokenKind::Identifier) => Ok(self.cursor.bump()),
            _ => Err(self
                .cursor
                .describe_error(|found, span| ParseErrorKind::ExpectedIdentifier { found, span })),
        }
    }

    fn parse_message(&mut self) -> Result<ast::Message, ParseError> {
        self.cursor.expect(TokenKind::Message)?;

        let name = self.parse_ident()?;

        self.cursor.expect(TokenKind::LeftBrace)?;

        let mut def = ast::MessageDef::default();
        loop {
            match self.cursor.peek_kind()? {
                Some(TokenKind::Message) => def.messages.push(self.parse_message()?),
                Some(TokenKind::Enum) => def.enums.push(self.parse_enum()?),
                Some(TokenKind::Oneof) => def.one_ofs.push(self.parse_oneof()?),
                Some(TokenKind::Option) => def.options.push(self.parse_option()?),
                Some(TokenKind::Semicolon) => {
                    self.cursor.bump();
                }
                Some(TokenKind::RightBrace) => {
                    self.cursor.bump();
                    break;
                }
                _ => def.fields.push(self.parse_field()?),
            }
        }

        trace!(%name, "parsed message");
        Ok(ast::Message { name, def })
    }

    fn parse_field(&mut self) -> Result<ast::Field, ParseError> {
        let repeated = self.cursor.bump_if(TokenKind::Repeated)?.is_some();

        self.parse_field_body(repeated)
    }

    fn parse_oneof_field(&mut self) -> Result<ast::Field, ParseError> {
        if self.cursor.peek_kind()? == Some(TokenKind::Repeated) {
            return Err(ParseErrorKind::OneofFieldWithLabel {
                span: self.cursor.span(),
            }
            .into());
        }

        self.parse_field_body(false)
    }

    fn parse_field_body(&mut self, repeated: bool) -> Result<ast::Field, ParseError> {
        let ty = self.parse_field_type()?;

        let name = self.parse_ident()?;

        self.cursor.expect(TokenKind::Equals)?;

        let number = self.cursor.expect(TokenKind::DecimalLiteral)?;

        let options = self.parse_options_list()?;

        self.cursor.expect(TokenKind::Semicolon)?;

        Ok(ast::Field {
            repeated,
            ty,
            name,
            number,
            options,
        })
    }

    fn parse_field_type(&mut self) -> Result<ast::FieldType, ParseError> {
        match self.cursor.peek_kind()? {
            Some(kind) if kind.is_scalar_type() => Ok(ast::FieldType::Scalar(self.cursor.bump())),
            Some(TokenKind::Identifier) => Ok(ast::FieldType::Named(self.parse_full_ident()?)),
            Some(TokenKind::Dot) => {
                self.cursor.bump();
                Ok(ast::FieldType::Absolute(self.parse_full_ident()?))
            }
            _ => Err(self
                .cursor
                .describe_error(|found, span| ParseErrorKind::InvalidFieldType { found, span })),
        }
    }

    fn parse_enum(&mut self) -> Result<ast::Enum, ParseError> {
        self.cursor.expect(TokenKind::Enum)?;

        let name = self.parse_ident()?;

        self.cursor.expect(TokenKind::LeftBrace)?;

        let mut def = ast::EnumDef::default();
        loop {
            match self.cursor.peek_kind()? {
                Some(TokenKind::Option) => def.options.push(self.parse_option()?),
                Some(TokenKind::Semicolon) => {
                    self.cursor.bump();
                }
                Some(TokenKind::RightBrace) => {
                    self.cursor.bump();
                    break;
                }
                _ => def.fields.push(self.parse_enum_field()?),
            }
        }

        trace!(%name, "parsed enum");
        Ok(ast::Enum { name, def })
    }

    fn parse_enum_field(&mut self) -> Result<ast::EnumField, ParseError> {
        let name = self.parse_ident()?;

        self.cursor.expect(TokenKind::Equals)?;

        let sign = self.parse_sign()?;
        let number = self.cursor.expect(TokenKind::DecimalLiteral)?;

        let options = self.parse_options_list()?;

        self.cursor.expect(TokenKind::Semicolon)?;

        Ok(ast::EnumField {
            name,
            number: ast::SignedNumber { sign, number },
            options,
        })
    }

    fn parse_oneof(&mut self) -> Result<ast::OneOf, ParseError> {
        self.cursor.expect(TokenKind::Oneof)?;

        let name = self.parse_ident()?;

        self.cursor.expect(TokenKind::LeftBrace)?;

        let mut fields = Vec::new();
        loop {
            match self.cursor.peek_kind()? {
                Some(TokenKind::RightBrace) => {
                    self.cursor.bump();
                    break;
                }
                _ => fields.push(self.parse_oneof_field()?),
            }
        }

        trace!(%name, fields = fields.len(), "parsed oneof");
        Ok(ast::OneOf { name, fields })
    }
}
