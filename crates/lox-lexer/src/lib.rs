//! Lox scanner: converts source text into tokens and scan diagnostics.
//!
//! Scanning never stops at the first problem. Unknown characters and
//! unterminated strings are recorded as [`ScanError`]s and the scanner carries
//! on, so a single pass reports everything it can find.
//!
//! ```rust
//! use lox_lexer::scan;
//! use lox_syntax::TokenKind;
//!
//! let result = scan("var answer = 42; @");
//! assert_eq!(result.tokens().len(), 6);
//! assert_eq!(result.tokens()[3].kind, TokenKind::Number(42.0));
//! assert_eq!(result.errors()[0].to_string(), "Scan error [1:18]: Unexpected character: @");
//! ```

pub mod chars;

use lox_syntax::error::{ScanError, ScanErrorKind};
use lox_syntax::token::{keyword, Token, TokenKind};
use tracing::{debug, trace};

use crate::chars::{is_alpha, is_alpha_numeric, is_digit};

/// Tokens and diagnostics produced by one scan, both in source order.
///
/// The token list always ends with exactly one [`TokenKind::Eof`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
}

impl ScanResult {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<ScanError>) {
        (self.tokens, self.errors)
    }
}

/// Scan a complete source string.
pub fn scan(source: &str) -> ScanResult {
    Scanner::new(source).scan_tokens()
}

/// Single-pass scanner over an immutable source string.
///
/// Positions are byte based: `offset` counts bytes consumed on the current
/// line, so a multi-byte character advances it by its UTF-8 length.
pub struct Scanner<'src> {
    source: &'src str,
    bytes: &'src [u8],
    /// First byte of the lexeme being scanned.
    start: usize,
    /// Next unread byte.
    current: usize,
    line: usize,
    /// Bytes consumed on the current line.
    line_offset: usize,
    start_line: usize,
    start_offset: usize,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
}

impl<'src> Scanner<'src> {
    /// Create a new scanner over the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
            line_offset: 0,
            start_line: 1,
            start_offset: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scan the whole input, consuming the scanner.
    pub fn scan_tokens(mut self) -> ScanResult {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_offset = self.line_offset + 1;
            self.scan_token();
        }

        self.tokens.push(Token::eof(self.line, self.line_offset + 1));
        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            bytes = self.bytes.len(),
            lines = self.line,
            "scan complete"
        );

        ScanResult {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self) {
        let Some(c) = self.advance() else {
            return;
        };
        match c {
            b'(' => self.add_token(TokenKind::LeftParen),
            b')' => self.add_token(TokenKind::RightParen),
            b'{' => self.add_token(TokenKind::LeftBrace),
            b'}' => self.add_token(TokenKind::RightBrace),
            b',' => self.add_token(TokenKind::Comma),
            b'.' => self.add_token(TokenKind::Dot),
            b'-' => self.add_token(TokenKind::Minus),
            b'+' => self.add_token(TokenKind::Plus),
            b';' => self.add_token(TokenKind::Semicolon),
            b'*' => self.add_token(TokenKind::Star),
            b'!' => self.operator(TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.operator(TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.operator(TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.operator(TokenKind::GreaterEqual, TokenKind::Greater),
            b'/' => self.comment_or_slash(),
            // Line bookkeeping for '\n' happens in `advance`.
            b' ' | b'\t' | b'\r' | b'\n' => {}
            b'"' => self.string(),
            c if is_digit(c) => self.number(),
            c if is_alpha(c) => self.identifier(),
            c => self.unexpected(c),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.current).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.current + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.current += 1;
        if c == b'\n' {
            self.line += 1;
            self.line_offset = 0;
        } else {
            self.line_offset += 1;
        }
        Some(c)
    }

    /// Consume the next byte only if it is `expected`.
    fn match_next(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn lexeme(&self) -> &'src str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, self.start_line, self.start_offset));
    }

    fn report(&mut self, kind: ScanErrorKind) {
        trace!(line = self.start_line, offset = self.start_offset, %kind, "scan error");
        self.errors.push(ScanError::new(kind, self.start_line, self.start_offset));
    }

    /// `!`, `=`, `<` and `>` take a following `=` when there is one.
    fn operator(&mut self, with_equal: TokenKind, bare: TokenKind) {
        let kind = if self.match_next(b'=') { with_equal } else { bare };
        self.add_token(kind);
    }

    fn comment_or_slash(&mut self) {
        if self.match_next(b'/') {
            // The newline is left for the main loop.
            while self.peek().is_some_and(|c| c != b'\n') {
                self.advance();
            }
        } else {
            self.add_token(TokenKind::Slash);
        }
    }

    fn string(&mut self) {
        while self.peek().is_some_and(|c| c != b'"') {
            self.advance();
        }

        if self.is_at_end() {
            self.report(ScanErrorKind::UnterminatedString);
            return;
        }

        // closing quote
        self.advance();
        let value = &self.source[self.start + 1..self.current - 1];
        self.add_token(TokenKind::String(value.to_string()));
    }

    fn number(&mut self) {
        while self.peek().is_some_and(is_digit) {
            self.advance();
        }

        // A trailing '.' without a digit after it is a separate DOT token.
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(is_digit) {
            self.advance();
            while self.peek().is_some_and(is_digit) {
                self.advance();
            }
        }

        // Digit runs with an optional fraction always parse.
        let value = self.lexeme().parse::<f64>().unwrap_or(f64::NAN);
        self.add_token(TokenKind::Number(value));
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(is_alpha_numeric) {
            self.advance();
        }
        let text = self.lexeme();
        let kind = keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        self.add_token(kind);
    }

    /// Record an unexpected character. A non-ASCII character is reported once
    /// and skipped whole so that lexemes stay on character boundaries.
    fn unexpected(&mut self, lead: u8) {
        let ch = match self.source[self.start..].chars().next() {
            Some(ch) => {
                let width = ch.len_utf8();
                self.current = self.start + width;
                self.line_offset += width - 1;
                ch
            }
            None => char::from(lead),
        };
        self.report(ScanErrorKind::UnexpectedCharacter(ch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<TokenKind> {
        scan(src).tokens().iter().map(|t| t.kind.clone()).collect()
    }

    fn positions(src: &str) -> Vec<(usize, usize)> {
        scan(src).tokens().iter().map(|t| (t.line, t.offset)).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    #[test]
    fn empty_input_yields_only_eof() {
        let result = scan("");
        assert_eq!(result.tokens(), &[Token::eof(1, 1)]);
        assert!(!result.has_errors());
    }

    #[test]
    fn single_paren() {
        assert_eq!(kinds("("), vec![TokenKind::LeftParen, TokenKind::Eof]);
    }

    #[test]
    fn all_single_character_punctuation() {
        assert_eq!(
            kinds("(){},.-+;*/"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Minus,
                TokenKind::Plus,
                TokenKind::Semicolon,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn two_character_operators_are_greedy() {
        assert_eq!(kinds("!="), vec![TokenKind::BangEqual, TokenKind::Eof]);
        assert_eq!(kinds("!"), vec![TokenKind::Bang, TokenKind::Eof]);
        assert_eq!(
            kinds("! = < > == <= >="),
            vec![
                TokenKind::Bang,
                TokenKind::Equal,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::EqualEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("!==="),
            vec![TokenKind::BangEqual, TokenKind::EqualEqual, TokenKind::Eof]
        );
        assert_eq!(kinds("<=="), vec![TokenKind::LessEqual, TokenKind::Equal, TokenKind::Eof]);
    }

    #[test]
    fn line_comment_produces_no_token() {
        let result = scan("// comment\n123");
        assert_eq!(
            result.tokens(),
            &[Token::new(TokenKind::Number(123.0), "123", 2, 1), Token::eof(2, 4)]
        );
        assert!(!result.has_errors());
    }

    #[test]
    fn comment_at_end_of_input() {
        assert_eq!(scan("a // trailing").tokens().len(), 2);
        assert_eq!(positions("// only"), vec![(1, 8)]);
    }

    #[test]
    fn slash_between_operands() {
        assert_eq!(
            kinds("a/b"),
            vec![ident("a"), TokenKind::Slash, ident("b"), TokenKind::Eof]
        );
    }

    #[test]
    fn string_literal_strips_quotes_in_value_only() {
        let result = scan("\"hello world\"");
        let token = &result.tokens()[0];
        assert_eq!(token.kind, TokenKind::String("hello world".to_string()));
        assert_eq!(token.lexeme, "\"hello world\"");
        assert_eq!((token.line, token.offset), (1, 1));
    }

    #[test]
    fn empty_string_literal() {
        assert_eq!(kinds("\"\""), vec![TokenKind::String(String::new()), TokenKind::Eof]);
    }

    #[test]
    fn strings_have_no_escapes() {
        assert_eq!(
            kinds(r#""a\n""#),
            vec![TokenKind::String("a\\n".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn multi_line_string_tracks_lines() {
        let result = scan("\"a\nb\" x");
        assert_eq!(
            result.tokens(),
            &[
                Token::new(TokenKind::String("a\nb".to_string()), "\"a\nb\"", 1, 1),
                Token::new(ident("x"), "x", 2, 4),
                Token::eof(2, 5),
            ]
        );
    }

    #[test]
    fn unterminated_string_is_reported_at_its_start() {
        let result = scan("\"abc");
        assert_eq!(result.tokens(), &[Token::eof(1, 5)]);
        assert_eq!(
            result.errors(),
            &[ScanError::new(ScanErrorKind::UnterminatedString, 1, 1)]
        );
        assert!(result.errors()[0].message().contains("Unterminated string literal"));
    }

    #[test]
    fn unterminated_string_after_tokens_on_later_line() {
        let result = scan("print 1;\nvar s = \"never\nclosed");
        let (tokens, errors) = result.into_parts();
        assert_eq!(tokens.len(), 7);
        assert_eq!(errors, vec![ScanError::new(ScanErrorKind::UnterminatedString, 2, 9)]);
        assert_eq!(tokens.last(), Some(&Token::eof(3, 7)));
    }

    #[test]
    fn integer_and_fractional_numbers() {
        let result = scan("123.45");
        assert_eq!(
            result.tokens(),
            &[Token::new(TokenKind::Number(123.45), "123.45", 1, 1), Token::eof(1, 7)]
        );
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        assert_eq!(
            kinds("123."),
            vec![TokenKind::Number(123.0), TokenKind::Dot, TokenKind::Eof]
        );
        assert_eq!(
            kinds("123.abs"),
            vec![TokenKind::Number(123.0), TokenKind::Dot, ident("abs"), TokenKind::Eof]
        );
    }

    #[test]
    fn number_grammar_has_no_sign_exponent_or_leading_dot() {
        assert_eq!(
            kinds("-3 .5 1e9 1.2.3"),
            vec![
                TokenKind::Minus,
                TokenKind::Number(3.0),
                TokenKind::Dot,
                TokenKind::Number(5.0),
                TokenKind::Number(1.0),
                ident("e9"),
                TokenKind::Number(1.2),
                TokenKind::Dot,
                TokenKind::Number(3.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifiers_and_keywords() {
        assert_eq!(
            kinds("foo_2 if"),
            vec![ident("foo_2"), TokenKind::If, TokenKind::Eof]
        );
        assert_eq!(
            kinds("_x classy or orchid"),
            vec![ident("_x"), ident("classy"), TokenKind::Or, ident("orchid"), TokenKind::Eof]
        );
    }

    #[test]
    fn every_reserved_word() {
        let src = lox_syntax::KEYWORDS.join(" ");
        let result = scan(&src);
        assert!(!result.has_errors());
        let tokens = result.tokens();
        assert_eq!(tokens.len(), lox_syntax::KEYWORDS.len() + 1);
        for (token, text) in tokens.iter().zip(lox_syntax::KEYWORDS) {
            assert!(token.kind.is_keyword(), "{} should be a keyword", text);
            assert_eq!(token.lexeme, text);
        }
    }

    #[test]
    fn unexpected_character_is_recorded_and_skipped() {
        let result = scan("@");
        assert_eq!(result.tokens(), &[Token::eof(1, 2)]);
        assert_eq!(
            result.errors(),
            &[ScanError::new(ScanErrorKind::UnexpectedCharacter('@'), 1, 1)]
        );
    }

    #[test]
    fn scanning_recovers_after_errors() {
        let result = scan("1 # 2 $\n3");
        assert_eq!(
            result.tokens(),
            &[
                Token::new(TokenKind::Number(1.0), "1", 1, 1),
                Token::new(TokenKind::Number(2.0), "2", 1, 5),
                Token::new(TokenKind::Number(3.0), "3", 2, 1),
                Token::eof(2, 2),
            ]
        );
        assert_eq!(
            result.errors(),
            &[
                ScanError::new(ScanErrorKind::UnexpectedCharacter('#'), 1, 3),
                ScanError::new(ScanErrorKind::UnexpectedCharacter('$'), 1, 7),
            ]
        );
    }

    #[test]
    fn non_ascii_character_is_one_error() {
        let result = scan("é+");
        assert_eq!(
            result.errors(),
            &[ScanError::new(ScanErrorKind::UnexpectedCharacter('é'), 1, 1)]
        );
        assert_eq!(
            result.tokens(),
            &[Token::new(TokenKind::Plus, "+", 1, 3), Token::eof(1, 4)]
        );
    }

    #[test]
    fn non_ascii_inside_strings_and_comments_is_kept() {
        let result = scan("\"héllo\" // ünïcode\nx");
        assert!(!result.has_errors());
        assert_eq!(
            kinds("\"héllo\" // ünïcode\nx"),
            vec![TokenKind::String("héllo".to_string()), ident("x"), TokenKind::Eof]
        );
    }

    #[test]
    fn statement_positions() {
        assert_eq!(
            positions("var x = 10;"),
            vec![(1, 1), (1, 5), (1, 7), (1, 9), (1, 11), (1, 12)]
        );
    }

    #[test]
    fn whitespace_and_crlf() {
        assert_eq!(positions("a\r\n\tb"), vec![(1, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn no_trailing_newline_required() {
        assert_eq!(kinds("x\n"), kinds("x"));
        assert_eq!(positions("x\n"), vec![(1, 1), (2, 1)]);
    }

    #[test]
    fn results_can_cross_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScanResult>();

        let handle = std::thread::spawn(|| scan("print 1;"));
        let result = handle.join().unwrap();
        assert_eq!(result.tokens().len(), 4);
    }

    #[test]
    fn scanning_is_idempotent() {
        let src = "fun add(a, b) { return a + b; }\nprint add(1, 2.5); \"oops";
        assert_eq!(scan(src), scan(src));
    }

    #[test]
    fn program_round_trip_lexemes() {
        let src = "class Foo < Bar { init() { this.x = nil; } }";
        let lexemes: Vec<String> = scan(src)
            .tokens()
            .iter()
            .map(|t| t.lexeme.clone())
            .collect();
        assert_eq!(
            lexemes,
            vec![
                "class", "Foo", "<", "Bar", "{", "init", "(", ")", "{", "this", ".", "x", "=",
                "nil", ";", "}", "}", "",
            ]
        );
    }
}
