use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;

use crate::render::{Format, Style};

/// Line-by-line prompt. Every line is scanned on its own; scan errors are
/// reported and the session continues.
pub fn start_repl(format: Format, style: Style) {
    let banner = "Lox scanner. Type :help for help, :quit to exit.";
    if style.color {
        println!("{}", banner.bold().green());
    } else {
        println!("{}", banner);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        let n = match input.read_line(&mut line) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read prompt input");
                println!("<input error>");
                break;
            }
        };
        if n == 0 {
            println!();
            break;
        }

        let source = line.trim_end_matches(&['\n', '\r'][..]);
        match source.trim() {
            ":quit" | ":q" | ":exit" => break,
            ":help" | ":h" => {
                print_help();
                continue;
            }
            cmd if cmd.starts_with(':') => {
                println!("Unknown command {}. Type :help.", cmd);
                continue;
            }
            _ => {}
        }

        let had_errors = crate::run(source, format, style);
        tracing::trace!(had_errors, "prompt line scanned");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :help   Show this help");
    println!("  :quit   Exit the prompt");
    println!("Any other line is scanned and its tokens are printed.");
}
