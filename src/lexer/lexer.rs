use std::iter::Peekable;
use std::str::Chars;

use log::trace;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::error::{LexError, LexResult};
use super::token::{Token, TokenKind};

/// Keyword table, consulted after a maximal alphanumeric run is read.
static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    HashMap::from([
        ("def", Def),
        ("return", Return),
        ("if", If),
        ("elif", Elif),
        ("else", Else),
        ("while", While),
        ("for", For),
        ("in", In),
        ("and", And),
        ("or", Or),
        ("not", Not),
        ("break", Break),
        ("continue", Continue),
        ("pass", Pass),
        ("import", Import),
        ("class", Class),
        ("print", Print),
        ("lambda", Lambda),
        ("True", True),
        ("False", False),
        ("None", None),
    ])
});

/// Hand-rolled, character-at-a-time lexer with indentation tracking: an
/// indentation stack plus a bracket-depth counter ride alongside the usual
/// line counter.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    bracket_depth: usize,
    indent_stack: Vec<usize>,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            bracket_depth: 0,
            indent_stack: vec![0],
            tokens: Vec::new(),
        }
    }

    fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(kind, self.line));
    }

    /// Consume characters up to (but not including) the next `\n`.
    fn skip_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Skip blank lines, comment-only lines, and finally reconcile the
    /// indentation of the next line carrying real content against the
    /// indent stack, emitting Indent/Dedent tokens as needed.
    ///
    /// Returns `Ok(true)` if a line with content was found, `Ok(false)` at
    /// end of source.
    fn start_of_line(&mut self) -> LexResult<bool> {
        loop {
            let mut width = 0usize;
            loop {
                match self.peek() {
                    Some(' ') => {
                        width += 1;
                        self.advance();
                    }
                    Some('\t') => {
                        return Err(LexError::new(
                            "tabs are not allowed in indentation",
                            self.line,
                        ));
                    }
                    _ => break,
                }
            }

            match self.peek() {
                None => return Ok(false),
                Some('\n') => {
                    self.advance();
                    self.line += 1;
                    continue;
                }
                Some('#') => {
                    self.skip_comment();
                    continue;
                }
                Some(_) => {
                    self.reconcile_indent(width)?;
                    return Ok(true);
                }
            }
        }
    }

    fn reconcile_indent(&mut self, width: usize) -> LexResult<()> {
        let top = *self.indent_stack.last().unwrap();
        if width > top {
            trace!("line {}: indent {top} -> {width}", self.line);
            self.indent_stack.push(width);
            self.push(TokenKind::Indent);
        } else if width < top {
            trace!("line {}: dedent {top} -> {width}", self.line);
            loop {
                self.indent_stack.pop();
                self.push(TokenKind::Dedent);
                let top = *self.indent_stack.last().ok_or_else(|| {
                    LexError::new("inconsistent dedent", self.line)
                })?;
                if top == width {
                    break;
                }
                if top < width {
                    return Err(LexError::new("inconsistent dedent", self.line));
                }
            }
        }
        Ok(())
    }

    fn lex_ident_or_keyword(&mut self) {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match KEYWORDS.get(text.as_str()) {
            Some(kind) => self.push(kind.clone()),
            None => self.push(TokenKind::Ident(text)),
        }
    }

    fn lex_number(&mut self) -> LexResult<()> {
        let mut text = String::new();
        let mut is_float = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.peek() == Some('.') {
            // Only consume the dot as a decimal point if a digit follows;
            // otherwise it is e.g. the start of a trailing `.method` call.
            let mut lookahead = self.chars.clone();
            lookahead.next();
            if matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
                is_float = true;
                text.push('.');
                self.advance();
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        text.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let mut lookahead = self.chars.clone();
            lookahead.next();
            let sign_consumed = matches!(lookahead.peek(), Some('+') | Some('-'));
            if sign_consumed {
                lookahead.next();
            }
            if matches!(lookahead.peek(), Some(c) if c.is_ascii_digit()) {
                is_float = true;
                text.push(self.advance().unwrap());
                if matches!(self.peek(), Some('+') | Some('-')) {
                    text.push(self.advance().unwrap());
                }
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        text.push(c);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        self.push(TokenKind::Number { text, is_float });
        Ok(())
    }

    fn lex_string(&mut self, quote: char) -> LexResult<()> {
        let start_line = self.line;
        self.advance(); // opening quote
        let mut raw = String::new();
        loop {
            match self.advance() {
                None => {
                    return Err(LexError::new("unterminated string literal", start_line));
                }
                Some('\\') => {
                    raw.push('\\');
                    match self.advance() {
                        Some(escaped) => {
                            if escaped == '\n' {
                                self.line += 1;
                            }
                            raw.push(escaped);
                        }
                        None => {
                            return Err(LexError::new(
                                "unterminated string literal",
                                start_line,
                            ));
                        }
                    }
                }
                Some(c) if c == quote => break,
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    raw.push(c);
                }
            }
        }

        let decoded = unescape::unescape(&raw).unwrap_or(raw);
        self.push(TokenKind::Str(decoded));
        Ok(())
    }

    fn lex_operator(&mut self) -> LexResult<()> {
        let c = self.advance().expect("caller already peeked a char");
        let kind = match c {
            '+' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::MinusEq
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    TokenKind::DoubleStar
                } else if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.peek() == Some('/') {
                    self.advance();
                    TokenKind::DoubleSlash
                } else if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::SlashEq
                } else {
                    TokenKind::Slash
                }
            }
            '%' => TokenKind::Percent,
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::NotEq
                } else {
                    return Err(LexError::new("unexpected character '!'", self.line));
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            ':' => TokenKind::Colon,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            other => {
                return Err(LexError::new(
                    format!("unexpected character '{other}'"),
                    self.line,
                ));
            }
        };
        self.push(kind);
        Ok(())
    }

    /// Run the lexer to completion, producing the final token stream.
    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        if !self.start_of_line()? {
            self.finish();
            return Ok(self.tokens);
        }

        loop {
            match self.peek() {
                None => break,
                Some(' ') | Some('\t') => {
                    self.advance();
                }
                Some('\n') => {
                    self.advance();
                    let newline_line = self.line;
                    self.line += 1;
                    if self.bracket_depth == 0 {
                        self.tokens.push(Token::new(TokenKind::Newline, newline_line));
                        if !self.start_of_line()? {
                            break;
                        }
                    }
                }
                Some('#') => self.skip_comment(),
                Some(c) if c.is_ascii_digit() => self.lex_number()?,
                Some(c) if c.is_alphabetic() || c == '_' => self.lex_ident_or_keyword(),
                Some('"') => self.lex_string('"')?,
                Some('\'') => self.lex_string('\'')?,
                Some('(') => {
                    self.bracket_depth += 1;
                    self.advance();
                    self.push(TokenKind::LParen);
                }
                Some(')') => {
                    self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    self.advance();
                    self.push(TokenKind::RParen);
                }
                Some('[') => {
                    self.bracket_depth += 1;
                    self.advance();
                    self.push(TokenKind::LBracket);
                }
                Some(']') => {
                    self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    self.advance();
                    self.push(TokenKind::RBracket);
                }
                Some('{') => {
                    self.bracket_depth += 1;
                    self.advance();
                    self.push(TokenKind::LBrace);
                }
                Some('}') => {
                    self.bracket_depth = self.bracket_depth.saturating_sub(1);
                    self.advance();
                    self.push(TokenKind::RBrace);
                }
                Some(_) => self.lex_operator()?,
            }
        }

        self.finish();
        trace!("lexed {} tokens", self.tokens.len());
        Ok(self.tokens)
    }

    /// Unwind the indent stack and append the terminal EOF token.
    fn finish(&mut self) {
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push(TokenKind::Dedent);
        }
        self.push(TokenKind::Eof);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .lex()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_simple_arithmetic() {
        assert_eq!(
            kinds("1 + 2 * 3"),
            vec![
                TokenKind::Number {
                    text: "1".into(),
                    is_float: false
                },
                TokenKind::Plus,
                TokenKind::Number {
                    text: "2".into(),
                    is_float: false
                },
                TokenKind::Star,
                TokenKind::Number {
                    text: "3".into(),
                    is_float: false
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_indent_and_dedent() {
        let src = "if True:\n    x = 1\ny = 2\n";
        let kinds = kinds(src);
        assert_eq!(
            kinds,
            vec![
                TokenKind::If,
                TokenKind::True,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Indent,
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::Number {
                    text: "1".into(),
                    is_float: false
                },
                TokenKind::Newline,
                TokenKind::Dedent,
                TokenKind::Ident("y".into()),
                TokenKind::Eq,
                TokenKind::Number {
                    text: "2".into(),
                    is_float: false
                },
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_transparent() {
        let src = "x = 1\n\n# a comment\n\ny = 2\n";
        let kinds = kinds(src);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::Number {
                    text: "1".into(),
                    is_float: false
                },
                TokenKind::Newline,
                TokenKind::Ident("y".into()),
                TokenKind::Eq,
                TokenKind::Number {
                    text: "2".into(),
                    is_float: false
                },
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn brackets_suppress_newlines() {
        let src = "x = [1,\n2,\n3]\n";
        let kinds = kinds(src);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("x".into()),
                TokenKind::Eq,
                TokenKind::LBracket,
                TokenKind::Number {
                    text: "1".into(),
                    is_float: false
                },
                TokenKind::Comma,
                TokenKind::Number {
                    text: "2".into(),
                    is_float: false
                },
                TokenKind::Comma,
                TokenKind::Number {
                    text: "3".into(),
                    is_float: false
                },
                TokenKind::RBracket,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes_are_decoded() {
        let kinds = kinds("\"a\\nb\"");
        assert_eq!(
            kinds,
            vec![TokenKind::Str("a\nb".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::new("\"abc").lex().unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn inconsistent_dedent_is_an_error() {
        let src = "if True:\n    x = 1\n  y = 2\n";
        assert!(Lexer::new(src).lex().is_err());
    }
}
