use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use parser::diagnostics::{print_diagnostics, Severity};
use parser::{tokenize, Token};

#[derive(ValueEnum, Debug, Copy, Clone, PartialEq)]
enum Format {
    /// One token per line.
    Text,
    /// A JSON array of tokens.
    Json,
}

/// Tokenize a Python-style source file and print the normalized token stream.
#[derive(Parser, Debug)]
#[command(name = "pylex", version)]
struct Args {
    /// Path of the source file.
    path: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

/// Render a token in the classic token-dump shape:
/// `[@3,10:11='x',<Name>,2:4]`. Line breaks and tabs in the token text are
/// escaped so every token stays on one line.
fn format_token(index: usize, tok: &Token<'_>) -> String {
    let text = tok
        .text
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!(
        "[@{index},{}:{}='{text}',<{:?}>,{}:{}]",
        tok.span.start, tok.span.end, tok.kind, tok.line, tok.col
    )
}

fn main() -> ExitCode {
    let args = Args::parse();

    let src = match fs::read_to_string(&args.path) {
        Ok(src) => src,
        Err(err) => {
            eprintln!("failed to read {}: {err}", args.path.display());
            return ExitCode::FAILURE;
        }
    };

    let (tokens, diagnostics) = tokenize(&src);

    match args.format {
        Format::Text => {
            for (i, tok) in tokens.iter().enumerate() {
                println!("{}", format_token(i, tok));
            }
        }
        Format::Json => match serde_json::to_string_pretty(&tokens) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize tokens: {err}");
                return ExitCode::FAILURE;
            }
        },
    }

    let name = args.path.display().to_string();
    print_diagnostics(&name, &src, &diagnostics);

    if diagnostics.iter().any(|d| d.severity == Severity::Error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::format_token;
    use parser::tokenize;

    #[test]
    fn token_dump_quotes_and_escapes_text() {
        let (tokens, _) = tokenize("x = 1\n");
        assert_eq!(format_token(0, &tokens[0]), "[@0,0:1='x',<Name>,1:0]");
        assert_eq!(format_token(3, &tokens[3]), "[@3,5:6='\\n',<Newline>,1:5]");
    }
}
