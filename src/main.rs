use std::io::{self, BufRead, Write};

use clap::Parser as CParser;
use log::error;

use pythia::interpreter::Interpreter;
use pythia::{lexer::Lexer, parser, run_source, InterpreterError};

/// `pythia <path>` runs a file; `pythia` with no path opens a REPL.
#[derive(CParser, Debug)]
#[command(author, version, about)]
struct Cli {
    file: Option<std::path::PathBuf>,
}

fn main() {
    simple_logger::init_with_level(log::Level::Warn).unwrap();
    let args = Cli::parse();

    let exit_code = match args.file {
        Some(path) => run_file(&path),
        None => run_repl(),
    };

    std::process::exit(exit_code);
}

fn run_file(path: &std::path::Path) -> i32 {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            error!("could not read file '{}': {e}", path.to_string_lossy());
            return 1;
        }
    };

    match run_source(&source, Box::new(io::stdout())) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{e}");
            1
        }
    }
}

/// A line-oriented REPL: a single [`Interpreter`] is kept alive for the
/// whole session so `def`/`class`/assignment bindings accumulate in one
/// persistent global environment. Input is buffered until a blank line
/// (the usual cue that an indented block is finished) or end of input,
/// then lexed, parsed, and run as one chunk against that same environment.
fn run_repl() -> i32 {
    let stdin = io::stdin();
    let interpreter = Interpreter::new(Box::new(io::stdout()));
    let mut buffer = String::new();
    let mut exit_code = 0;

    loop {
        print!("{} ", if buffer.is_empty() { ">>>" } else { "..." });
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        let bytes_read = match stdin.lock().read_line(&mut line) {
            Ok(n) => n,
            Err(e) => {
                error!("could not read from stdin: {e}");
                return 1;
            }
        };

        let at_eof = bytes_read == 0;
        if !at_eof && line.trim().is_empty() && buffer.is_empty() {
            continue;
        }
        if !at_eof && !line.trim().is_empty() {
            buffer.push_str(&line);
            continue;
        }

        if !buffer.is_empty() {
            if let Err(e) = run_chunk(&interpreter, &buffer) {
                eprintln!("{e}");
                exit_code = 1;
            }
            buffer.clear();
        }

        if at_eof {
            break;
        }
    }

    exit_code
}

fn run_chunk(interpreter: &Interpreter, chunk: &str) -> Result<(), InterpreterError> {
    let tokens = Lexer::new(chunk).lex()?;
    let program = parser::parse(tokens)?;
    interpreter.run(&program)?;
    Ok(())
}
