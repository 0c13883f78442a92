//! Indentation normalizer.
//!
//! A pull-based filter between the raw [`Lexer`] and a grammar-driven parser.
//! It suppresses line breaks inside brackets (implicit line joining), rewrites
//! the remaining physical line breaks into logical [`TokenKind::Newline`]
//! statement terminators, and synthesizes [`TokenKind::Indent`] and
//! [`TokenKind::Dedent`] tokens from an indentation-width stack, so the
//! downstream grammar never has to understand whitespace.
//!
//! Malformed indentation is not an error here: a dedent that matches no
//! enclosing width becomes a [`TokenKind::InconsistentDedent`] token plus a
//! diagnostic, and the stream keeps going. Bracket balance is not validated
//! at all; unmatched closers just decrement the nesting count below zero.

use std::collections::VecDeque;

use crate::diagnostics::Diagnostic;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::Span;

/// The standard tab stop width: a tab advances the indentation width to the
/// next multiple of 8.
pub const TAB_SIZE: usize = 8;

/// Tab-stop-expanded width of an indentation run (spaces and tabs only).
pub fn indentation_width(ws: &str) -> usize {
    let mut width = 0;
    for ch in ws.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += TAB_SIZE - width % TAB_SIZE,
            _ => {}
        }
    }
    width
}

/// A stateful token-stream filter that injects structural tokens.
///
/// Call [`Normalizer::next_token`] repeatedly; the stream ends with a single
/// `EndMarker`. The `Iterator` impl does the same and fuses after it. After
/// the stream is exhausted, `diagnostics` holds one error per inconsistent
/// dedent and at most one mixed-indentation warning.
pub struct Normalizer<'a> {
    lexer: Lexer<'a>,
    /// Tokens waiting to be handed to the consumer, oldest first. Drained
    /// before any new raw token is consumed.
    pending: VecDeque<Token<'a>>,
    /// Widths of the currently open blocks, strictly increasing. The bottom
    /// sentinel 0 is never popped.
    indents: Vec<usize>,
    /// Unmatched open brackets seen so far. May go negative on malformed
    /// input; bracket balance is the parser's concern.
    opened: isize,
    /// Kind of the most recently enqueued token.
    last_kind: Option<TokenKind>,
    used_spaces: bool,
    used_tabs: bool,
    started: bool,
    finished: bool,
    exhausted: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Normalizer<'a> {
    pub fn new(src: &'a str) -> Normalizer<'a> {
        Normalizer {
            lexer: Lexer::new(src),
            pending: VecDeque::new(),
            indents: vec![0],
            opened: 0,
            last_kind: None,
            used_spaces: false,
            used_tabs: false,
            started: false,
            finished: false,
            exhausted: false,
            diagnostics: Vec::new(),
        }
    }

    /// Return the next normalized token. The final token is `EndMarker`;
    /// further calls keep returning `EndMarker`.
    pub fn next_token(&mut self) -> Token<'a> {
        if let Some(tok) = self.pending.pop_front() {
            return tok;
        }
        if !self.started {
            self.started = true;
            self.insert_leading_tokens();
        }
        while self.pending.is_empty() {
            // A suppressed line break enqueues nothing; keep pulling.
            self.dispatch();
        }
        self.pending.pop_front().unwrap()
    }

    fn dispatch(&mut self) {
        let tok = self.lexer.next_token();
        if tok.kind.is_open_bracket() {
            self.opened += 1;
            self.enqueue(tok);
        } else if tok.kind.is_close_bracket() {
            self.opened -= 1;
            self.enqueue(tok);
        } else {
            match tok.kind {
                TokenKind::Nl => self.handle_line_break(tok),
                TokenKind::EndMarker => self.handle_end_of_input(tok),
                _ => self.enqueue(tok),
            }
        }
    }

    /// A file whose very first line is already indented is unreachable by the
    /// steady-state dedent logic, so it is handled before the first raw token:
    /// synthesize a statement terminator plus an `Indent` for the leading run.
    fn insert_leading_tokens(&mut self) {
        let run = self.lexer.peek_spaces_and_tabs();
        if run.is_empty() {
            return;
        }
        let width = self.measure(run);
        if width == 0 {
            return;
        }
        self.enqueue(Token {
            kind: TokenKind::Newline,
            text: run.into(),
            span: Span::zero_width(0),
            line: 1,
            col: 0,
        });
        let desc = format!(
            "<inserted leading INDENT, length={width}, level={}>",
            self.indents.len()
        );
        self.enqueue(Token {
            kind: TokenKind::Indent,
            text: desc.into(),
            span: Span::zero_width(0),
            line: 1,
            col: run.len(),
        });
        self.indents.push(width);
    }

    fn handle_line_break(&mut self, tok: Token<'a>) {
        if self.opened > 0 {
            // Implicit line joining; the break is not a statement boundary.
            return;
        }
        // A break right before another break or a comment marker introduces
        // a blank or comment-only line, which carries no statement boundary.
        if let Some('\r' | '\n' | '\x0c' | '#') = self.lexer.peek_char(1) {
            return;
        }

        // The indentation run of the next line rides along in the matched
        // text, after the line-break characters.
        let after_nl = tok.text.find('\n').map(|i| i + 1).unwrap_or(0);
        let width = match tok.text.get(after_nl..) {
            Some(run) => self.measure(run),
            None => 0,
        };

        self.enqueue(Token {
            kind: TokenKind::Newline,
            ..tok
        });
        self.resolve_indentation(width);
    }

    /// Compare `width` against the top of the indentation stack and enqueue
    /// the structural tokens that close the gap. One line break can close
    /// several nested blocks at once.
    fn resolve_indentation(&mut self, width: usize) {
        let top = *self.indents.last().unwrap();
        if width > top {
            let desc = format!(
                "<inserted INDENT, length={width}, level={}>",
                self.indents.len()
            );
            self.insert_token(TokenKind::Indent, desc);
            self.indents.push(width);
        } else {
            while width < *self.indents.last().unwrap() {
                self.indents.pop();
                let top = *self.indents.last().unwrap();
                if width <= top {
                    let desc = format!(
                        "<inserted DEDENT, length={top}, level={}>",
                        self.indents.len()
                    );
                    self.insert_token(TokenKind::Dedent, desc);
                } else {
                    // The width lands strictly between two known levels; the
                    // loop condition fails next round, ending the resolution.
                    let desc = format!(
                        "<inconsistent DEDENT, length={width}, level={}>",
                        self.indents.len()
                    );
                    self.insert_token(TokenKind::InconsistentDedent, desc);
                    self.diagnostics.push(Diagnostic::error(
                        Span::zero_width(self.lexer.offset()),
                        "inconsistent dedent",
                    ));
                }
            }
        }
    }

    fn handle_end_of_input(&mut self, tok: Token<'a>) {
        if !self.finished {
            self.finished = true;
            if self.last_kind.is_some() {
                self.insert_trailing_tokens();
            }
            if self.used_spaces && self.used_tabs {
                self.diagnostics.push(Diagnostic::warning(
                    tok.span,
                    "mixture of spaces and tabs were used for indentation",
                ));
            }
        }
        self.enqueue(tok);
    }

    /// Close the last statement and any still-open blocks, so every statement
    /// ends with a terminator and every `Indent` is matched by a `Dedent`.
    fn insert_trailing_tokens(&mut self) {
        match self.last_kind {
            Some(
                TokenKind::Newline | TokenKind::Dedent | TokenKind::InconsistentDedent,
            ) => {}
            _ => {
                self.insert_token(
                    TokenKind::Newline,
                    "<inserted trailing NEWLINE>".to_string(),
                );
            }
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            let top = *self.indents.last().unwrap();
            let desc = format!(
                "<inserted trailing DEDENT, length={top}, level={}>",
                self.indents.len()
            );
            self.insert_token(TokenKind::Dedent, desc);
        }
    }

    /// Enqueue a synthetic token at the current scan position.
    fn insert_token(&mut self, kind: TokenKind, text: String) {
        let tok = Token {
            kind,
            text: text.into(),
            span: Span::zero_width(self.lexer.offset()),
            line: self.lexer.line(),
            col: self.lexer.col(),
        };
        self.enqueue(tok);
    }

    fn enqueue(&mut self, tok: Token<'a>) {
        self.last_kind = Some(tok.kind);
        self.pending.push_back(tok);
    }

    /// Width of an indentation run, also recording which whitespace styles
    /// have been seen for the end-of-stream mixed-indentation warning.
    fn measure(&mut self, run: &str) -> usize {
        if run.contains(' ') {
            self.used_spaces = true;
        }
        if run.contains('\t') {
            self.used_tabs = true;
        }
        indentation_width(run)
    }
}

impl<'a> Iterator for Normalizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.exhausted {
            return None;
        }
        let tok = self.next_token();
        if tok.kind == TokenKind::EndMarker {
            self.exhausted = true;
        }
        Some(tok)
    }
}

#[cfg(test)]
mod tests {
    use super::indentation_width;

    #[test]
    fn tab_stops_every_eight_columns() {
        assert_eq!(indentation_width(""), 0);
        assert_eq!(indentation_width("    "), 4);
        assert_eq!(indentation_width("\t"), 8);
        assert_eq!(indentation_width(" \t"), 8);
        assert_eq!(indentation_width("\t\t"), 16);
        assert_eq!(indentation_width("       \t"), 8);
        assert_eq!(indentation_width("\t "), 9);
    }
}
