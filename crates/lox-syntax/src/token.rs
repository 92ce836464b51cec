//! Token definitions for the Lox language.
//!
//! This module defines every token the Lox scanner can produce. Tokens are the
//! smallest meaningful units of Lox source code: punctuation, operators,
//! literals, identifiers and reserved words.
//!
//! # Token Categories
//!
//! - **Punctuation**: `(` `)` `{` `}` `,` `.` `-` `+` `;` `*` `/`
//! - **Operators**: `!` `!=` `=` `==` `<` `<=` `>` `>=`
//! - **Literals**: strings and numbers (`"hello"`, `12.5`)
//! - **Identifiers**: `foo`, `_tmp`, `counter2`
//! - **Reserved words**: `and class else false for fun if nil or print return
//!   super this true var while`
//! - **Special**: the end-of-input marker
//!
//! # Examples
//!
//! ```rust
//! use lox_syntax::{Token, TokenKind};
//!
//! let paren = Token::new(TokenKind::LeftParen, "(", 1, 1);
//! assert_eq!(paren.kind.name(), "LEFT_PAREN");
//!
//! let number = Token::new(TokenKind::Number(42.0), "42", 1, 3);
//! assert_eq!(number.to_string(), "Tok{ NUMBER '42' 42 }");
//! ```

use std::fmt;

/// Token types that can be produced by the Lox scanner.
///
/// The closed punctuation, operator and keyword set are unit variants. Kinds
/// that carry data carry it as a payload: identifier text, the string value
/// without its quotes, and the numeric value.
///
/// ```rust
/// use lox_syntax::TokenKind;
///
/// let name = TokenKind::Identifier("counter".to_string());
/// let text = TokenKind::String("Hello, world!".to_string());
/// let number = TokenKind::Number(100.0);
/// assert!(!name.is_keyword());
/// assert!(TokenKind::While.is_keyword());
/// assert_eq!(text.name(), "STRING");
/// assert_eq!(number.name(), "NUMBER");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Single-character punctuation ===
    /// Left parenthesis `(`
    LeftParen,

    /// Right parenthesis `)`
    RightParen,

    /// Left brace `{`
    LeftBrace,

    /// Right brace `}`
    RightBrace,

    /// Comma separator `,`
    Comma,

    /// Property access `.`
    Dot,

    /// Subtraction and unary negation `-`
    Minus,

    /// Addition `+`
    Plus,

    /// Statement terminator `;`
    Semicolon,

    /// Multiplication `*`
    Star,

    /// Division `/`
    Slash,

    // === One or two character operators ===
    /// Logical NOT `!`
    Bang,

    /// Inequality `!=`
    BangEqual,

    /// Assignment `=`
    Equal,

    /// Equality `==`
    EqualEqual,

    /// Greater-than `>`
    Greater,

    /// Greater-than-or-equal `>=`
    GreaterEqual,

    /// Less-than `<`
    Less,

    /// Less-than-or-equal `<=`
    LessEqual,

    // === Literals ===
    /// An identifier such as `foo` or `my_variable`
    Identifier(String),

    /// A string literal; the payload excludes the delimiting quotes
    String(String),

    /// A numeric literal, always a 64-bit float
    Number(f64),

    // === Reserved words ===
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    /// End-of-input marker, always the last token of a scan
    Eof,
}

impl TokenKind {
    /// Stable upper-snake name of the kind, e.g. `BANG_EQUAL`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::String(_) => "STRING",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::Fun => "FUN",
            TokenKind::For => "FOR",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Returns `true` for the sixteen reserved words.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Class
                | TokenKind::Else
                | TokenKind::False
                | TokenKind::Fun
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Nil
                | TokenKind::Or
                | TokenKind::Print
                | TokenKind::Return
                | TokenKind::Super
                | TokenKind::This
                | TokenKind::True
                | TokenKind::Var
                | TokenKind::While
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every reserved word of the language, in alphabetical order.
pub const KEYWORDS: [&str; 16] = [
    "and", "class", "else", "false", "for", "fun", "if", "nil", "or", "print", "return", "super",
    "this", "true", "var", "while",
];

/// Look up a reserved word by its text.
///
/// Returns `None` for anything that is not one of [`KEYWORDS`]; the caller
/// then treats the text as an identifier. Matching is case-sensitive.
///
/// ```rust
/// use lox_syntax::{keyword, TokenKind};
///
/// assert_eq!(keyword("while"), Some(TokenKind::While));
/// assert_eq!(keyword("While"), None);
/// ```
pub fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "and" => TokenKind::And,
        "class" => TokenKind::Class,
        "else" => TokenKind::Else,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "fun" => TokenKind::Fun,
        "if" => TokenKind::If,
        "nil" => TokenKind::Nil,
        "or" => TokenKind::Or,
        "print" => TokenKind::Print,
        "return" => TokenKind::Return,
        "super" => TokenKind::Super,
        "this" => TokenKind::This,
        "true" => TokenKind::True,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        _ => return None,
    };
    Some(kind)
}

/// Literal value carried by a string or number token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Str(&'a str),
    Number(f64),
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "{}", s),
            Literal::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A token with its source location information.
///
/// # Fields
///
/// - `kind`: the type and semantic content of the token
/// - `lexeme`: the exact source text that produced it (empty for `Eof`)
/// - `line`: 1-based line on which the token starts
/// - `offset`: 1-based position within that line of the token's first character
///
/// Position information is recorded where the lexeme begins, so a string
/// literal spanning several lines reports the line of its opening quote:
///
/// ```text
/// Scan error [3:9]: Unterminated string literal
///   var s = "never closed
///           ^
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The type and semantic content of this token
    pub kind: TokenKind,

    /// Source text of this token
    pub lexeme: String,

    /// Line number in the source (1-based)
    pub line: usize,

    /// Position within the line (1-based)
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            offset,
        }
    }

    /// The synthetic end-of-input token.
    pub fn eof(line: usize, offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", line, offset)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Literal value for string and number tokens, `None` for every other kind.
    pub fn literal(&self) -> Option<Literal<'_>> {
        match &self.kind {
            TokenKind::String(s) => Some(Literal::Str(s.as_str())),
            TokenKind::Number(n) => Some(Literal::Number(*n)),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tok{{ {} '{}'", self.kind, self.lexeme)?;
        if let Some(lit) = self.literal() {
            write!(f, " {}", lit)?;
        }
        f.write_str(" }")
    }
}
