pub mod diagnostics;
pub mod lexer;
pub mod normalizer;
pub mod span;

pub use lexer::{Lexer, Token, TokenKind};
pub use normalizer::Normalizer;
pub use span::Span;

use diagnostics::Diagnostic;

/// Tokenize the file content string into a normalized token stream.
///
/// Runs the raw lexer and the indentation normalizer to completion. The
/// returned stream always ends with a single `EndMarker`, every `Indent` is
/// balanced by a `Dedent`, and every statement ends with a `Newline` (one is
/// synthesized for a last line without a trailing line break).
///
/// The returned diagnostics are non-fatal and should be printed; if any of
/// them is an error, the downstream parse of this stream should ultimately
/// fail.
pub fn tokenize(src: &str) -> (Vec<Token<'_>>, Vec<Diagnostic>) {
    let mut normalizer = Normalizer::new(src);
    let tokens = normalizer.by_ref().collect();
    (tokens, normalizer.diagnostics)
}
