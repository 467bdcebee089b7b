use std::fmt;
use std::iter::Fuse;

use crate::entry::Entry;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

/// Classifies a strict-mode parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token that does not fit the `[export ]NAME=[VALUE]` grammar.
    UnexpectedToken { kind: TokenKind, literal: String },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { kind, literal } => {
                write!(f, "Unexpected token {kind} value={literal}")
            }
        }
    }
}

/// Error produced by strict parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} line={} pos={}", span.line, span.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    fn unexpected(token: Token) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedToken {
                kind: token.kind,
                literal: token.literal,
            },
            span: token.span,
        }
    }
}

/// Result of strict parsing: the entries read before the first error,
/// and that error if there was one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StrictParse {
    pub entries: Vec<Entry>,
    pub error: Option<ParseError>,
}

impl StrictParse {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the partial entries when an error occurred.
    pub fn into_result(self) -> Result<Vec<Entry>, ParseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.entries),
        }
    }
}

/// Parse `.env` source text, skipping anything malformed.
///
/// Incomplete assignments and stray tokens are dropped silently; this
/// never fails.
#[must_use]
pub fn parse(input: &str) -> Vec<Entry> {
    parse_tokens(Lexer::new(input))
}

/// Parse a token stream permissively. See [`parse`].
#[must_use]
pub fn parse_tokens<I>(tokens: I) -> Vec<Entry>
where
    I: IntoIterator<Item = Token>,
{
    let mut entries = Vec::new();
    let mut state = Pending::Idle;

    for token in tokens {
        let at_end = token.kind == TokenKind::EndOfInput;
        state = state.step(token, &mut entries);
        if at_end {
            return entries;
        }
    }

    // stream ended without an EndOfInput token
    state.step(
        Token::new(TokenKind::EndOfInput, "", Span::default()),
        &mut entries,
    );
    entries
}

/// Parse `.env` source text, stopping at the first malformed line.
///
/// ```
/// use envfile_rs::parse_strict;
///
/// let result = parse_strict("A=1\njust some words\n");
/// assert_eq!(result.entries.len(), 1);
/// assert_eq!(
///     result.error.unwrap().to_string(),
///     "Unexpected token IDENT value=some line=1 pos=6"
/// );
/// ```
#[must_use]
pub fn parse_strict(input: &str) -> StrictParse {
    parse_tokens_strict(Lexer::new(input))
}

/// Parse a token stream strictly. See [`parse_strict`].
#[must_use]
pub fn parse_tokens_strict<I>(tokens: I) -> StrictParse
where
    I: IntoIterator<Item = Token>,
{
    let mut parser = StrictParser {
        tokens: tokens.into_iter().fuse(),
        last_span: Span::default(),
        entries: Vec::new(),
    };
    let error = parser.run().err();
    StrictParse {
        entries: parser.entries,
        error,
    }
}

/// Assignment matcher for permissive parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Idle,
    SawKey(String),
    SawKeyEquals(String),
}

impl Pending {
    fn step(self, token: Token, entries: &mut Vec<Entry>) -> Self {
        match (self, token.kind) {
            (_, TokenKind::Identifier) => Self::SawKey(token.literal),
            (Self::SawKey(key) | Self::SawKeyEquals(key), TokenKind::Equals) => {
                Self::SawKeyEquals(key)
            }
            (Self::SawKeyEquals(key), kind @ (TokenKind::Value | TokenKind::RawValue)) => {
                entries.push(Entry::new(key, token.literal, kind == TokenKind::RawValue));
                Self::Idle
            }
            (
                Self::SawKeyEquals(key),
                TokenKind::Comment | TokenKind::EndOfLine | TokenKind::EndOfInput,
            ) => {
                entries.push(Entry::new(key, "", false));
                Self::Idle
            }
            _ => Self::Idle,
        }
    }
}

struct StrictParser<I> {
    tokens: Fuse<I>,
    last_span: Span,
    entries: Vec<Entry>,
}

impl<I> StrictParser<I>
where
    I: Iterator<Item = Token>,
{
    fn run(&mut self) -> Result<(), ParseError> {
        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::EndOfInput => return Ok(()),
                TokenKind::Comment | TokenKind::EndOfLine => {}
                TokenKind::Export => {
                    let key = self.expect(TokenKind::Identifier)?;
                    self.parse_assignment(key)?;
                }
                TokenKind::Identifier => self.parse_assignment(token)?,
                _ => return Err(ParseError::unexpected(token)),
            }
        }
    }

    fn parse_assignment(&mut self, key: Token) -> Result<(), ParseError> {
        self.expect(TokenKind::Equals)?;

        let token = self.next_token();
        let entry = match token.kind {
            TokenKind::Value | TokenKind::RawValue => Entry::new(
                key.literal,
                token.literal,
                token.kind == TokenKind::RawValue,
            ),
            TokenKind::Comment | TokenKind::EndOfLine | TokenKind::EndOfInput => {
                Entry::new(key.literal, "", false)
            }
            _ => return Err(ParseError::unexpected(token)),
        };

        self.entries.push(entry);
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.next_token();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::unexpected(token))
        }
    }

    fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.last_span = token.span;
                token
            }
            None => Token::new(TokenKind::EndOfInput, "", self.last_span),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn token(kind: TokenKind, literal: &str) -> Token {
        Token::new(kind, literal, Span::default())
    }

    #[test]
    fn simple_assignments() {
        let entries = parse("A=1\nB='two'\nC=\"three\"\n");
        assert_eq!(
            entries,
            vec![
                Entry::new("A", "1", false),
                Entry::new("B", "two", true),
                Entry::new("C", "three", false),
            ]
        );
    }

    #[test]
    fn export_prefix() {
        let entries = parse("export A=1");
        assert_eq!(entries, vec![Entry::new("A", "1", false)]);
        let strict = parse_strict("export A=1").into_result().expect("parse failed");
        assert_eq!(strict, entries);
    }

    #[test]
    fn empty_assignment() {
        let entries = parse("A=\nB= # nothing\nC=");
        assert_eq!(
            entries,
            vec![
                Entry::new("A", "", false),
                Entry::new("B", "", false),
                Entry::new("C", "", false),
            ]
        );
    }

    #[test]
    fn permissive_drops_broken_lines() {
        let entries = parse("just some words\nFOO='bar\n");
        assert!(entries.is_empty());
    }

    #[test]
    fn permissive_recovers_after_garbage() {
        let entries = parse("!!!\n='orphan'\nOK=yes\n");
        assert_eq!(entries, vec![Entry::new("OK", "yes", false)]);
    }

    #[test]
    fn strict_reports_position() {
        let result = parse_strict("just some words\n");
        assert!(result.entries.is_empty());
        let err = result.error.expect("should fail");
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                kind: TokenKind::Identifier,
                literal: "some".to_string(),
            }
        );
        assert_eq!(err.span, Span { line: 0, column: 6 });
    }

    #[test]
    fn strict_keeps_entries_before_error() {
        let result = parse_strict("A=1\nB\nC=3\n");
        assert!(!result.is_ok());
        assert_eq!(result.entries, vec![Entry::new("A", "1", false)]);
        let err = result.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Unexpected token EOL value= line=1 pos=2");
    }

    #[test]
    fn strict_rejects_export_without_identifier() {
        let err = parse_strict("export =1").into_result().unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                kind: TokenKind::Equals,
                ..
            }
        ));
    }

    #[test]
    fn strict_rejects_illegal_value() {
        let err = parse_strict("FOO='bar").into_result().unwrap_err();
        assert_eq!(err.to_string(), "Unexpected token ILLEGAL value=bar line=0 pos=5");
    }

    #[test]
    fn token_slices_without_end_of_input() {
        let tokens = vec![
            token(TokenKind::Identifier, "A"),
            token(TokenKind::Equals, "="),
        ];
        assert_eq!(parse_tokens(tokens.clone()), vec![Entry::new("A", "", false)]);
        assert_eq!(
            parse_tokens_strict(tokens).into_result(),
            Ok(vec![Entry::new("A", "", false)])
        );
    }

    #[test]
    fn parse_accepts_pre_lexed_tokens() {
        let tokens = tokenize("A=1 # c\n");
        assert_eq!(parse_tokens(tokens), vec![Entry::new("A", "1", false)]);
    }

    #[test]
    fn matcher_transitions() {
        let mut entries = Vec::new();
        let state = Pending::Idle.step(token(TokenKind::Equals, "="), &mut entries);
        assert_eq!(state, Pending::Idle);

        let state = state.step(token(TokenKind::Identifier, "K"), &mut entries);
        assert_eq!(state, Pending::SawKey("K".to_string()));

        let state = state.step(token(TokenKind::Equals, "="), &mut entries);
        assert_eq!(state, Pending::SawKeyEquals("K".to_string()));

        let state = state.step(token(TokenKind::RawValue, "v"), &mut entries);
        assert_eq!(state, Pending::Idle);
        assert_eq!(entries, vec![Entry::new("K", "v", true)]);
    }

    #[test]
    fn value_without_equals_resets() {
        let mut entries = Vec::new();
        let state = Pending::SawKey("K".to_string()).step(token(TokenKind::Value, "v"), &mut entries);
        assert_eq!(state, Pending::Idle);
        assert!(entries.is_empty());
    }
}
