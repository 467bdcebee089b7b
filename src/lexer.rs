use crate::token::{Span, Token, TokenKind};

const EXPORT_KEYWORD: &str = "export";

/// Tokenize a `.env` source string, including the trailing
/// [`TokenKind::EndOfInput`] token.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Context-sensitive lexer over the code points of a `.env` source.
///
/// Whether the text after `=` is read as a free-form value or as an
/// identifier depends on the kind of the previously emitted token, so a
/// lexer instance must be driven by a single caller from start to end.
///
/// As an [`Iterator`] the lexer yields every token up to and including
/// [`TokenKind::EndOfInput`], then stops. [`Lexer::next_token`] keeps
/// returning `EndOfInput` tokens instead.
#[derive(Debug, Clone)]
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    prev: Option<TokenKind>,
    finished: bool,
}

impl Lexer {
    #[must_use]
    pub fn new(input: &str) -> Self {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 0,
            col: 1,
            prev: None,
            finished: false,
        }
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Token {
        let token = self.lex_token();
        self.prev = Some(token.kind);
        token
    }

    fn lex_token(&mut self) -> Token {
        self.skip_whitespace();
        let span = self.span();

        let Some(ch) = self.peek() else {
            return Token::new(TokenKind::EndOfInput, "", span);
        };

        match ch {
            '\r' | '\n' => {
                self.read_line_terminator();
                Token::new(TokenKind::EndOfLine, "", span)
            }
            '#' => Token::new(TokenKind::Comment, self.read_comment(), span),
            '=' => {
                self.advance();
                Token::new(TokenKind::Equals, "=", span)
            }
            '\'' | '"' => self.read_quoted(ch, span),
            _ if self.at_export_keyword() => {
                for _ in 0..EXPORT_KEYWORD.len() {
                    self.advance();
                }
                Token::new(TokenKind::Export, EXPORT_KEYWORD, span)
            }
            _ if self.prev == Some(TokenKind::Equals) => {
                Token::new(TokenKind::Value, self.read_unquoted(), span)
            }
            _ => self.read_identifier(ch, span),
        }
    }

    const fn span(&self) -> Span {
        Span {
            line: self.line,
            column: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
            self.col += 1;
        }
    }

    const fn start_line(&mut self) {
        self.line += 1;
        self.col = 1;
    }

    /// Advance over one character that may itself end a line.
    fn advance_counting_lines(&mut self) {
        let ch = self.peek();
        self.advance();
        let ends_line = match ch {
            Some('\n') => true,
            Some('\r') => self.peek() != Some('\n'),
            _ => false,
        };
        if ends_line {
            self.start_line();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_blank) {
            self.advance();
        }
    }

    fn read_line_terminator(&mut self) {
        if self.peek() == Some('\r') {
            self.advance();
            if self.peek() == Some('\n') {
                self.advance();
            }
        } else {
            self.advance();
        }
        self.start_line();
    }

    fn read_comment(&mut self) -> String {
        self.advance(); // skip #

        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            text.push(ch);
            self.advance();
        }

        text.trim().to_string()
    }

    fn read_quoted(&mut self, quote: char, span: Span) -> Token {
        self.advance(); // skip opening quote

        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Token::new(TokenKind::Illegal, value, span),
                Some('\\') if self.peek_at(1) == Some(quote) => {
                    value.push(quote);
                    self.advance();
                    self.advance();
                }
                Some(ch) if ch == quote => {
                    self.advance();
                    break;
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance_counting_lines();
                }
            }
        }

        let kind = if quote == '\'' {
            TokenKind::RawValue
        } else {
            TokenKind::Value
        };
        Token::new(kind, value, span)
    }

    fn read_unquoted(&mut self) -> String {
        let mut value = String::new();
        while let Some(ch) = self.peek() {
            if ch == '\n' || ch == '\r' {
                break;
            }
            // whitespace before `#` opens a trailing comment, `a#b` does not
            if ch.is_whitespace() && self.peek_at(1) == Some('#') {
                break;
            }
            value.push(ch);
            self.advance();
        }

        value.trim().to_string()
    }

    fn read_identifier(&mut self, first: char, span: Span) -> Token {
        if !is_ident_start(first) {
            self.advance();
            return Token::new(TokenKind::Illegal, first.to_string(), span);
        }

        let mut name = String::new();
        while let Some(ch) = self.peek().filter(|&c| is_ident_continue(c)) {
            name.push(ch);
            self.advance();
        }

        Token::new(TokenKind::Identifier, name, span)
    }

    fn at_export_keyword(&self) -> bool {
        let end = self.pos + EXPORT_KEYWORD.len();
        let word_matches = self
            .input
            .get(self.pos..end)
            .is_some_and(|word| word.iter().copied().eq(EXPORT_KEYWORD.chars()));

        word_matches && !self.input.get(end).copied().is_some_and(is_ident_continue)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndOfInput {
            self.finished = true;
        }
        Some(token)
    }
}

impl std::iter::FusedIterator for Lexer {}

const fn is_blank(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\u{0B}' | '\u{0C}' | ' ' | '\u{85}' | '\u{A0}'
    )
}

const fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

const fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
