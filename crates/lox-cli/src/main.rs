mod logging;
mod render;
mod repl;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use lox_lexer::scan;
use lox_syntax::error::{error, Error, Result};

use crate::render::{render_error, render_scan_error, render_tokens, Format, Style};

// sysexits(3)
const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_NOINPUT: i32 = 66;

#[derive(Parser, Debug)]
#[command(name = "lox", version, about = "Scan Lox scripts and print their tokens")]
#[command(override_usage = "lox [OPTIONS] [script]")]
struct Cli {
    /// Script to scan. Starts an interactive prompt when omitted.
    script: Option<PathBuf>,

    /// Token output format. Falls back to LOX_FORMAT, then compact.
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<Format>,

    /// Never color diagnostics
    #[arg(long = "no-color", default_value_t = false)]
    no_color: bool,
}

impl Cli {
    fn output_format(&self) -> Format {
        self.format.or_else(Format::from_env).unwrap_or_default()
    }
}

/// Scan one chunk of source and print the result. Returns `true` when the
/// scan recorded errors.
pub(crate) fn run(source: &str, format: Format, style: Style) -> bool {
    let result = scan(source);
    for err in result.errors() {
        render_scan_error(style, source, err);
    }
    println!("{}", render_tokens(result.tokens(), format));
    result.has_errors()
}

/// Read a script as bytes and decode it leniently. Invalid UTF-8 becomes
/// U+FFFD, which the scanner then reports as an unexpected character.
fn read_source(path: &Path) -> Result<String> {
    if !path.exists() {
        return error(format!("File not found: {}", path.display()));
    }
    let bytes = fs::read(path)
        .map_err(|e| Error::new(format!("Failed to read {}: {}", path.display(), e)))?;
    let src = String::from_utf8_lossy(&bytes);
    if let std::borrow::Cow::Owned(_) = src {
        tracing::warn!(path = %path.display(), "script is not valid UTF-8; invalid bytes replaced");
    }
    Ok(src.into_owned())
}

fn run_file(path: &Path, format: Format, style: Style) -> i32 {
    let src = match read_source(path) {
        Ok(s) => s,
        Err(e) => {
            render_error(style, &e);
            return EX_NOINPUT;
        }
    };
    tracing::debug!(path = %path.display(), bytes = src.len(), "scanning script");

    if run(&src, format, style) {
        EX_DATAERR
    } else {
        0
    }
}

fn main() {
    logging::init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(EX_USAGE);
        }
    };

    let format = cli.output_format();
    let style = Style::detect(cli.no_color);

    let code = match cli.script.as_deref() {
        Some(path) => run_file(path, format, style),
        None => {
            repl::start_repl(format, style);
            0
        }
    };
    process::exit(code);
}
