use std::borrow::Cow;

use logos::Logos;
use serde::Serialize;

use crate::span::Span;

/// A lexical token.
///
/// Tokens produced by the raw lexer borrow their text from the source string.
/// Tokens inserted by the normalizer own a short description instead (e.g.
/// `<inserted INDENT, length=4, level=1>`) and carry a zero-width span at the
/// insertion point.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: Cow<'a, str>,
    pub span: Span,
    /// 1-based line number of the token start.
    pub line: usize,
    /// 0-based column offset of the token start.
    pub col: usize,
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Logos)]
#[logos(skip r"[ \t]+")]
pub enum TokenKind {
    /// Unrecognized input. Passed through; rejecting it is the parser's job.
    Error,

    /// A physical line break. The matched text includes the indentation run
    /// of the following line, which is what the normalizer measures.
    #[regex(r"\r?\n[ \t]*")]
    Nl,

    /// A logical statement terminator. Never produced by the raw lexer; the
    /// normalizer rewrites significant `Nl` tokens into this kind.
    Newline,
    /// Virtual block-start token inserted by the normalizer.
    Indent,
    /// Virtual block-end token inserted by the normalizer.
    Dedent,
    /// A dedent that matches no enclosing indentation width. Malformed-input
    /// marker for the parser to reject; not fatal here.
    InconsistentDedent,
    /// End of input. Emitted exactly once, as the final token.
    EndMarker,

    #[regex(r"#[^\n]*")]
    Comment,

    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,
    #[regex("[0-9]+")]
    Int,
    #[regex("0[xX][0-9a-fA-F]+")]
    Hex,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    Text,

    // Symbols
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,
    #[token("|")]
    Pipe,
    #[token("&")]
    Amper,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token("%")]
    Percent,
    #[token("~")]
    Tilde,
    #[token("^")]
    Hat,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("->")]
    Arrow,
}

impl TokenKind {
    pub fn is_open_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::ParenOpen | TokenKind::BracketOpen | TokenKind::BraceOpen
        )
    }

    pub fn is_close_bracket(&self) -> bool {
        matches!(
            self,
            TokenKind::ParenClose | TokenKind::BracketClose | TokenKind::BraceClose
        )
    }
}
