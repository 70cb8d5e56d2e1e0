use logos::Span;

use crate::{
    error::{ParseError, ParseErrorKind, END_OF_INPUT},
    lex::{Token, TokenKind},
};

/// A pull-based source of tokens.
///
/// `Ok` items are tokens with their byte range in the source text. An `Err`
/// item marks input which could not be tokenized, and is reported as an
/// `invalid token` error when the cursor reaches it.
///
/// Any iterator of `Result<(Token, Span), Span>` is a token source, including
/// [`Lexer`](crate::Lexer).
pub trait TokenSource {
    /// Pulls the next token, or returns `None` once the input is exhausted.
    fn next_token(&mut self) -> Option<Result<(Token, Span), Span>>;
}

impl<I> TokenSource for I
where
    I: Iterator<Item = Result<(Token, Span), Span>>,
{
    fn next_token(&mut self) -> Option<Result<(Token, Span), Span>> {
        self.next()
    }
}

/// A reader over a [`TokenSource`] with one token of lookahead.
///
/// Tokens are consumed strictly in order and there is no way to rewind.
#[derive(Debug)]
pub struct Cursor<S> {
    source: S,
    peek: Option<(Token, Span)>,
    end: usize,
}

impl<S: TokenSource> Cursor<S> {
    /// Creates a cursor positioned at the first token of `source`.
    pub fn new(source: S) -> Self {
        Cursor {
            source,
            peek: None,
            end: 0,
        }
    }

    /// Returns the next token without consuming it, or `None` at end of input.
    pub fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        self.fill()?;
        Ok(self.peek.as_ref().map(|(tok, _)| tok))
    }

    /// Returns the kind of the next token without consuming it.
    pub fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParseError> {
        Ok(self.peek()?.map(|tok| tok.kind))
    }

    /// Consumes and returns the next token, or `None` at end of input.
    pub fn advance(&mut self) -> Result<Option<Token>, ParseError> {
        self.fill()?;
        Ok(self.peek.take().map(|(tok, _)| tok))
    }

    /// Consumes the next token if it has the given kind.
    ///
    /// Otherwise fails with `expected '<kind>', got <text> instead`, leaving the
    /// token in place.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        match self.peek_kind()? {
            Some(found) if found == kind => Ok(self.bump()),
            _ => Err(self.error(|found, span| ParseErrorKind::UnexpectedToken {
                expected: kind,
                found,
                span,
            })),
        }
    }

    /// Consumes the next token if it has the given kind.
    pub fn bump_if(&mut self, kind: TokenKind) -> Result<Option<Token>, ParseError> {
        match self.peek_kind()? {
            Some(found) if found == kind => Ok(Some(self.bump())),
            _ => Ok(None),
        }
    }

    /// Takes the token returned by the last successful [`peek`](Cursor::peek).
    pub(crate) fn bump(&mut self) -> Token {
        let (tok, _) = self
            .peek
            .take()
            .expect("called bump without peek returning Some()");
        tok
    }

    /// The span of the peeked token, or an empty span after the last token.
    pub(crate) fn span(&self) -> Span {
        match &self.peek {
            Some((_, span)) => span.clone(),
            None => self.end..self.end,
        }
    }

    /// Builds an error about the peeked token, naming it by its text.
    ///
    /// Must only be called after `peek`, otherwise the token is reported as
    /// the end of input.
    pub(crate) fn error(&self, f: impl FnOnce(String, Span) -> ParseErrorKind) -> ParseError {
        let found = match &self.peek {
            Some((tok, _)) => tok.text.clone(),
            None => END_OF_INPUT.to_owned(),
        };
        f(found, self.span()).into()
    }

    /// Like [`error`](Cursor::error), but names identifiers and literals by
    /// their class as well as their text.
    pub(crate) fn describe_error(
        &self,
        f: impl FnOnce(String, Span) -> ParseErrorKind,
    ) -> ParseError {
        let found = match &self.peek {
            Some((tok, _)) => tok.description(),
            None => END_OF_INPUT.to_owned(),
        };
        f(found, self.span()).into()
    }

    fn fill(&mut self) -> Result<(), ParseError> {
        if self.peek.is_none() {
            match self.source.next_token() {
                Some(Ok((tok, span))) => {
                    self.end = span.end;
                    self.peek = Some((tok, span));
                }
                Some(Err(span)) => {
                    self.end = span.end;
                    return Err(ParseErrorKind::InvalidToken { span }.into());
                }
                None => (),
            }
        }
        Ok(())
    }
}
