//! Caller-visible token and diagnostic records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of one syntactic unit, used for both highlighting
/// tokens and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeKind {
    TopLevelCommand,
    Keyword,
    FieldRule,
    SymbolDefinition,
    SymbolReference,
    Enumerant,
    Namespace,
    Number,
    String,
    Comment,
    Error,
    Text,
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CodeKind::TopLevelCommand => "top-level command",
            CodeKind::Keyword => "keyword",
            CodeKind::FieldRule => "field rule",
            CodeKind::SymbolDefinition => "symbol definition",
            CodeKind::SymbolReference => "symbol reference",
            CodeKind::Enumerant => "enumerant",
            CodeKind::Namespace => "namespace",
            CodeKind::Number => "number",
            CodeKind::String => "string",
            CodeKind::Comment => "comment",
            CodeKind::Error => "error",
            CodeKind::Text => "text",
        };
        write!(f, "{}", name)
    }
}

/// One classified syntactic unit.
///
/// `text` is only populated when the literal contents cannot be
/// recovered from the span alone (reconstructed floats, string bodies,
/// comment text); otherwise it is left empty and the caller slices the
/// source with `position..position + length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub line: usize,
    pub position: usize,
    pub length: usize,
    pub text: String,
    pub kind: CodeKind,
}

impl Token {
    pub(crate) fn new(line: usize, position: usize, length: usize, kind: CodeKind) -> Self {
        Self {
            line,
            position,
            length,
            text: String::new(),
            kind,
        }
    }

    pub(crate) fn with_text(
        line: usize,
        position: usize,
        length: usize,
        text: String,
        kind: CodeKind,
    ) -> Self {
        Self {
            line,
            position,
            length,
            text,
            kind,
        }
    }
}

/// An error record with a source position, independent of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub position: usize,
    pub length: usize,
    pub message: String,
    pub kind: CodeKind,
    /// Position relative to the start of its own line, filled in by a
    /// post-pass once all newlines are known; diagnostics on line 0 keep
    /// the absolute position.
    pub offset: usize,
}

/// Everything one analysis pass produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    /// Index one past the last lexeme the parser consumed.
    pub final_cursor: usize,
}
