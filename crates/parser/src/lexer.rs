mod token;

use logos::Logos;
pub use token::{Token, TokenKind};

use crate::span::Span;

/// A raw lexer over a source string.
///
/// Yields primitive tokens in document order and ends with an unbounded run
/// of `EndMarker` tokens, so pulling past the end of input is harmless. It
/// knows nothing about statement boundaries or block structure; that is the
/// normalizer's job.
#[derive(Clone)]
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    line: usize,
    line_start: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer with the given source code string.
    pub fn new(src: &'a str) -> Lexer<'a> {
        Lexer {
            inner: TokenKind::lexer(src),
            line: 1,
            line_start: 0,
        }
    }

    /// Return the full source code string that's being tokenized.
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }

    /// Return the next raw token, or `EndMarker` if the input is exhausted.
    pub fn next_token(&mut self) -> Token<'a> {
        let (kind, text, span) = match self.inner.next() {
            Some(Ok(kind)) => (kind, self.inner.slice(), self.inner.span()),
            Some(Err(())) => (TokenKind::Error, self.inner.slice(), self.inner.span()),
            None => {
                let end = self.inner.source().len();
                (TokenKind::EndMarker, "", end..end)
            }
        };

        let line = self.line;
        let col = span.start - self.line_start;

        if kind == TokenKind::Nl {
            // The matched text is `\r?\n` plus the next line's indentation
            // run; the new line starts right after the `\n`.
            let after_nl = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
            self.line += 1;
            self.line_start = span.start + after_nl;
        }

        Token {
            kind,
            text: text.into(),
            span: Span::new(span.start, span.end),
            line,
            col,
        }
    }

    /// Peek at the `nth` (1-based) not-yet-consumed input character, without
    /// advancing the lexer.
    pub fn peek_char(&self, nth: usize) -> Option<char> {
        debug_assert!(nth >= 1);
        self.inner.remainder().chars().nth(nth - 1)
    }

    /// The maximal run of spaces and tabs at the current input position.
    /// Pure lookahead; the lexer's position is unchanged.
    pub fn peek_spaces_and_tabs(&self) -> &'a str {
        let rem = self.inner.remainder();
        let end = rem
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(rem.len());
        &rem[..end]
    }

    /// 1-based line number of the current scan position.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 0-based column offset of the current scan position.
    pub fn col(&self) -> usize {
        self.inner.span().end - self.line_start
    }

    /// Byte offset of the current scan position.
    pub fn offset(&self) -> usize {
        self.inner.span().end
    }
}

#[cfg(test)]
mod tests {
    use super::{Lexer, TokenKind};
    use TokenKind::*;

    fn check(input: &str, expected: &[TokenKind]) {
        let mut lex = Lexer::new(input);

        let mut actual = vec![];
        loop {
            let tok = lex.next_token();
            if tok.kind == EndMarker {
                break;
            }
            actual.push(tok.kind);
        }

        assert!(
            actual.iter().eq(expected.iter()),
            "\nexpected: {expected:?}\n  actual: {actual:?}"
        );
    }

    #[test]
    fn basic() {
        check(
            "def f(x):\n    return x + 1\n",
            &[
                Name, Name, ParenOpen, Name, ParenClose, Colon, Nl, Name, Name, Plus, Int, Nl,
            ],
        );
    }

    #[test]
    fn newline_carries_indentation_run() {
        let mut lex = Lexer::new("a\n  b");
        assert_eq!(lex.next_token().kind, Name);
        let nl = lex.next_token();
        assert_eq!(nl.kind, Nl);
        assert_eq!(nl.text, "\n  ");
        let b = lex.next_token();
        assert_eq!(b.kind, Name);
        assert_eq!((b.line, b.col), (2, 2));
    }

    #[test]
    fn crlf() {
        let mut lex = Lexer::new("a\r\nb");
        assert_eq!(lex.next_token().kind, Name);
        let nl = lex.next_token();
        assert_eq!(nl.kind, Nl);
        assert_eq!(nl.text, "\r\n");
        assert_eq!(lex.next_token().kind, Name);
    }

    #[test]
    fn strings_and_comments() {
        check(
            "x = \"hi \\\" there\" # trailing\n",
            &[Name, Eq, Text, Comment, Nl],
        );
    }

    #[test]
    fn errors_pass_through() {
        check("a ? b", &[Name, Error, Name]);
    }

    #[test]
    fn end_marker_is_sticky() {
        let mut lex = Lexer::new("");
        assert_eq!(lex.next_token().kind, EndMarker);
        assert_eq!(lex.next_token().kind, EndMarker);
    }

    #[test]
    fn peeking_does_not_consume() {
        let lex = Lexer::new("  \tx");
        assert_eq!(lex.peek_spaces_and_tabs(), "  \t");
        assert_eq!(lex.peek_char(1), Some(' '));
        assert_eq!(lex.peek_char(4), Some('x'));
        assert_eq!(lex.peek_char(5), None);

        let mut lex = lex;
        assert_eq!(lex.next_token().kind, TokenKind::Name);
    }
}
