//! Error-tolerant tokenizer and recursive-descent parser for the
//! Protocol-Buffers IDL, built to drive live editor feedback.
//!
//! [`analyze`] accepts arbitrary, possibly incomplete .proto source text
//! and returns a classified token stream for syntax highlighting plus a
//! list of diagnostics with exact character offsets and line numbers. It
//! recovers after errors so one typo does not blank out the rest of the
//! file, and it never panics on any input.
//!
//! [`analyze_comments_only`] runs just the splitter and the comment
//! stripper, for callers that only need to know whether an offset falls
//! inside a comment.

pub mod classify;
mod comments;
pub mod error;
pub mod lexer;
mod parser;
mod defaults;
#[cfg(feature = "pretty-errors")]
pub mod reporting;
pub mod token;

pub use classify::{scalar_type_of, ScalarType};
pub use error::{ParseResult, SyntaxError};
pub use lexer::{split, Lexeme, LexemeKind};
pub use parser::{analyze, analyze_comments_only, Parser};
#[cfg(feature = "pretty-errors")]
pub use reporting::format_diagnostics;
pub use token::{Analysis, CodeKind, Diagnostic, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_basic() {
        let analysis = analyze("message M {}");
        assert_eq!(analysis.tokens.len(), 2);
        assert!(analysis.diagnostics.is_empty());
    }

    #[test]
    fn test_comments_only() {
        let tokens = analyze_comments_only("// note\nmessage M {}");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, CodeKind::Comment);
    }
}
