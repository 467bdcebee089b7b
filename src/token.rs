use std::fmt;

/// Source location for error reporting.
///
/// Lines are counted from 0, columns from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The `export` keyword.
    Export,
    /// Variable name (`[A-Za-z_][A-Za-z0-9_]*`).
    Identifier,
    /// Assignment operator `=`.
    Equals,
    /// Unquoted or double-quoted value, eligible for expansion.
    Value,
    /// Single-quoted value, never expanded.
    RawValue,
    /// Comment (`# ...`), literal holds the trimmed text.
    Comment,
    /// Line terminator (`\n`, `\r\n` or `\r`).
    EndOfLine,
    /// End of input.
    EndOfInput,
    /// Unterminated quote or a character that cannot start a token.
    Illegal,
}

impl TokenKind {
    /// Short uppercase name used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Export => "EXPORT",
            Self::Identifier => "IDENT",
            Self::Equals => "EQUALS",
            Self::Value => "VALUE",
            Self::RawValue => "RAW_VALUE",
            Self::Comment => "COMMENT",
            Self::EndOfLine => "EOL",
            Self::EndOfInput => "EOF",
            Self::Illegal => "ILLEGAL",
        }
    }

    /// Whether a token of this kind carries an assignable value.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(self, Self::Value | Self::RawValue)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single token with its kind, literal text, and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} value={} line={} pos={}",
            self.kind, self.literal, self.span.line, self.span.column
        )
    }
}
