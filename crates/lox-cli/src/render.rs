use std::io::IsTerminal;

use clap::ValueEnum;
use owo_colors::OwoColorize;
use lox_syntax::error::{Error, ScanError, ScanErrorKind};
use lox_syntax::token::{Token, TokenKind};

/// How tokens are printed on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Lexemes joined by `·`, identifiers shown as `I<name>`
    #[default]
    Compact,
    /// One token per line with position, kind and literal
    Verbose,
}

impl Format {
    /// Reads `LOX_FORMAT`; unknown values are ignored.
    pub fn from_env() -> Option<Format> {
        let value = std::env::var("LOX_FORMAT").ok()?;
        <Format as ValueEnum>::from_str(value.trim(), true).ok()
    }
}

/// Whether diagnostics are colored.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub color: bool,
}

impl Style {
    /// Color only when stderr is a terminal, `NO_COLOR` is unset and the user
    /// did not pass `--no-color`.
    pub fn detect(no_color: bool) -> Self {
        let color = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stderr().is_terminal();
        Self { color }
    }

    fn error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.bright_black().to_string()
        } else {
            text.to_string()
        }
    }

    fn hint(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

pub fn render_tokens(tokens: &[Token], format: Format) -> String {
    match format {
        Format::Compact => compact(tokens),
        Format::Verbose => verbose(tokens),
    }
}

/// `var x = 1;` renders as `var·I<x>·=·1·;·EOF`.
pub fn compact(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match &t.kind {
            TokenKind::Eof => "EOF".to_string(),
            TokenKind::Identifier(name) => format!("I<{}>", name),
            _ => t.lexeme.clone(),
        })
        .collect::<Vec<_>>()
        .join("·")
}

pub fn verbose(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| {
            let mut line = format!("{}:{} {} '{}'", t.line, t.offset, t.kind.name(), t.lexeme);
            if let Some(lit) = t.literal() {
                line.push(' ');
                line.push_str(&lit.to_string());
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print a scan error to stderr with the offending source line and a caret.
pub fn render_scan_error(style: Style, source: &str, err: &ScanError) {
    eprintln!("{}", style.error(&err.to_string()));
    if let Some(src_line) = source.lines().nth(err.line.saturating_sub(1)) {
        let gutter = format!("{:3} | ", err.line);
        eprintln!("{}{}", style.dim(&gutter), src_line);
        let marker = format!(
            "{}{}^",
            " ".repeat(gutter.len()),
            " ".repeat(caret_column(src_line, err.offset))
        );
        eprintln!("{}", style.error(&marker));
    }
    if let Some(help) = suggestion(&err.kind) {
        eprintln!("{}", style.hint(help));
    }
}

/// Characters before the 1-based byte `offset` on `line`. Offsets count
/// bytes, the terminal counts characters.
fn caret_column(line: &str, offset: usize) -> usize {
    let end = offset.saturating_sub(1);
    line.char_indices().take_while(|&(i, _)| i < end).count()
}

/// Print a tooling error (unreadable script and the like).
pub fn render_error(style: Style, err: &Error) {
    eprintln!("{}: {}", style.error("error"), err);
}

fn suggestion(kind: &ScanErrorKind) -> Option<&'static str> {
    match kind {
        ScanErrorKind::UnterminatedString => {
            Some("Help: Make sure every \" has a matching closing \"")
        }
        ScanErrorKind::UnexpectedCharacter('&') => Some("Help: Lox spells logical AND as 'and'"),
        ScanErrorKind::UnexpectedCharacter('|') => Some("Help: Lox spells logical OR as 'or'"),
        ScanErrorKind::UnexpectedCharacter('\'') => Some("Help: Strings use double quotes"),
        ScanErrorKind::UnexpectedCharacter('#') => Some("Help: Comments start with '//'"),
        ScanErrorKind::UnexpectedCharacter(_) => None,
    }
}
