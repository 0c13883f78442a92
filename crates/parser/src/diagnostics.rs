//! Diagnostics collected during normalization.
//!
//! The normalizer never fails: indentation anomalies surface as sentinel
//! tokens in the stream plus an entry here, and the consumer decides whether
//! they are fatal. Rendering lives at the edge via `codespan-reporting`.

use codespan_reporting::diagnostic::{
    Diagnostic as CsDiagnostic, Label as CsLabel, Severity as CsSeverity,
};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{BufferWriter, ColorChoice};
use serde::Serialize;

use crate::span::Span;

#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn error<S: Into<String>>(span: Span, message: S) -> Self {
        Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            span,
        }
    }

    pub fn warning<S: Into<String>>(span: Span, message: S) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
            span,
        }
    }

    /// Convert into a [`codespan_reporting`] diagnostic for a single file.
    pub fn into_cs(self) -> CsDiagnostic<()> {
        let diag = match self.severity {
            Severity::Error => CsDiagnostic::new(CsSeverity::Error),
            Severity::Warning => CsDiagnostic::new(CsSeverity::Warning),
        };
        diag.with_message(self.message)
            .with_labels(vec![CsLabel::primary((), self.span)])
    }
}

/// Print the given diagnostics to stderr.
pub fn print_diagnostics(name: &str, src: &str, diagnostics: &[Diagnostic]) {
    let writer = BufferWriter::stderr(ColorChoice::Auto);
    let mut buffer = writer.buffer();
    let file = SimpleFile::new(name, src);
    let config = term::Config::default();

    for diag in diagnostics {
        term::emit(&mut buffer, &config, &file, &diag.clone().into_cs())
            .expect("failed to emit diagnostic");
    }
    // If we use `writer` here, the output won't be captured by rust's test system.
    eprint!("{}", std::str::from_utf8(buffer.as_slice()).unwrap());
}

/// Format the given diagnostics as a string.
pub fn diagnostics_string(name: &str, src: &str, diagnostics: &[Diagnostic]) -> String {
    let writer = BufferWriter::stderr(ColorChoice::Never);
    let mut buffer = writer.buffer();
    let file = SimpleFile::new(name, src);
    let config = term::Config::default();

    for diag in diagnostics {
        term::emit(&mut buffer, &config, &file, &diag.clone().into_cs())
            .expect("failed to emit diagnostic");
    }
    std::str::from_utf8(buffer.as_slice()).unwrap().to_string()
}
