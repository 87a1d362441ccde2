//! Error types for the analyzer

use crate::token::{CodeKind, Diagnostic};
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, SyntaxError>;

/// A structured parse failure.
///
/// Carries the most specific source position available. Productions
/// record a diagnostic for the failure and propagate the value with `?`,
/// so a caller cannot forget to check it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected end of file: expected {expected}")]
    UnexpectedEof { position: usize, expected: String },

    #[error("expected {expected}, found '{found}'")]
    UnexpectedLexeme {
        position: usize,
        length: usize,
        expected: String,
        found: String,
    },
}

impl SyntaxError {
    pub fn eof(position: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            position,
            expected: expected.into(),
        }
    }

    pub fn unexpected(
        position: usize,
        length: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedLexeme {
            position,
            length,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedEof { position, .. } => *position,
            Self::UnexpectedLexeme { position, .. } => *position,
        }
    }

    pub fn length(&self) -> usize {
        match self {
            Self::UnexpectedEof { .. } => 1,
            Self::UnexpectedLexeme { length, .. } => *length,
        }
    }
}

/// Accumulates diagnostics with first-wins deduplication: a second
/// diagnostic at an already-reported position is dropped, so nested
/// checks failing on one lexeme surface a single report.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    items: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn report(&mut self, line: usize, position: usize, length: usize, message: impl Into<String>) {
        if self.items.iter().any(|d| d.position == position) {
            return;
        }
        self.items.push(Diagnostic {
            line,
            position,
            length,
            message: message.into(),
            kind: CodeKind::Error,
            offset: position,
        });
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_diagnostic_at_a_position_wins() {
        let mut sink = DiagnosticSink::new();
        sink.report(0, 4, 1, "first");
        sink.report(0, 4, 3, "second");
        sink.report(0, 5, 1, "third");

        let items = sink.into_inner();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].message, "first");
        assert_eq!(items[1].message, "third");
    }

    #[test]
    fn test_error_positions() {
        let error = SyntaxError::eof(10, "';'");
        assert_eq!(error.position(), 10);
        assert_eq!(error.length(), 1);

        let error = SyntaxError::unexpected(3, 7, "'='", "message");
        assert_eq!(error.position(), 3);
        assert_eq!(error.length(), 7);
        assert_eq!(error.to_string(), "expected '=', found 'message'");
    }
}
