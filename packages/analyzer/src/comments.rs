//! Comment stripping pre-pass.
//!
//! Runs once between the splitter and the parser: every `//` and
//! `/* */` run collapses into a single Comment token and the parser
//! receives a new, filtered lexeme sequence. Newlines that terminate a
//! line comment stay in the stream; newlines inside a removed block
//! comment are deleted with it.

use crate::error::DiagnosticSink;
use crate::lexer::{Lexeme, LexemeKind};
use crate::token::{CodeKind, Token};

pub(crate) fn strip_comments<'src>(
    source: &'src str,
    lexemes: &[Lexeme<'src>],
    tokens: &mut Vec<Token>,
    diagnostics: &mut DiagnosticSink,
) -> Vec<Lexeme<'src>> {
    let mut kept = Vec::with_capacity(lexemes.len());
    let mut line = 0usize;
    let mut i = 0usize;

    while i < lexemes.len() {
        let lexeme = lexemes[i];
        match lexeme.kind {
            LexemeKind::Newline => {
                line += 1;
                kept.push(lexeme);
                i += 1;
            }
            LexemeKind::LineComment => {
                let mut j = i + 1;
                while j < lexemes.len() && lexemes[j].kind != LexemeKind::Newline {
                    j += 1;
                }
                let end = if j < lexemes.len() {
                    lexemes[j].start
                } else {
                    source.len()
                };
                let slice = &source[lexeme.start..end];
                let text = slice.strip_suffix('\r').unwrap_or(slice);
                tokens.push(Token::with_text(
                    line,
                    lexeme.start,
                    text.len(),
                    text.to_string(),
                    CodeKind::Comment,
                ));
                // the terminating newline, if any, is kept
                i = j;
            }
            LexemeKind::BlockOpen => {
                let mut j = i + 1;
                while j < lexemes.len() && lexemes[j].kind != LexemeKind::BlockClose {
                    j += 1;
                }
                if j < lexemes.len() {
                    let end = lexemes[j].end();
                    tokens.push(Token::with_text(
                        line,
                        lexeme.start,
                        end - lexeme.start,
                        source[lexeme.start..end].to_string(),
                        CodeKind::Comment,
                    ));
                    i = j + 1;
                } else {
                    // no closing `*/` before the end of the sequence
                    let end = lexemes.last().map(|l| l.end()).unwrap_or(lexeme.end());
                    tokens.push(Token::with_text(
                        line,
                        lexeme.start,
                        end - lexeme.start,
                        source[lexeme.start..end].to_string(),
                        CodeKind::Comment,
                    ));
                    diagnostics.report(line, end, 1, "comment is not terminated");
                    i = lexemes.len();
                }
            }
            _ => {
                kept.push(lexeme);
                i += 1;
            }
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::split;

    fn strip(source: &str) -> (Vec<Lexeme<'_>>, Vec<Token>, Vec<crate::token::Diagnostic>) {
        let raw = split(source);
        let mut tokens = Vec::new();
        let mut diagnostics = DiagnosticSink::new();
        let kept = strip_comments(source, &raw, &mut tokens, &mut diagnostics);
        (kept, tokens, diagnostics.into_inner())
    }

    #[test]
    fn test_line_comment_collapses_to_one_token() {
        let (kept, tokens, diagnostics) = strip("// c\nmessage");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, CodeKind::Comment);
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[0].length, 4);
        assert_eq!(tokens[0].text, "// c");
        // the newline survives for line counting
        assert_eq!(kept[0].kind, LexemeKind::Newline);
        assert_eq!(kept[1].text, "message");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_line_comment_trims_trailing_carriage_return() {
        let (_, tokens, _) = strip("// c\r\nx");
        assert_eq!(tokens[0].text, "// c");
        assert_eq!(tokens[0].length, 4);
    }

    #[test]
    fn test_line_comment_at_end_of_input() {
        let (kept, tokens, diagnostics) = strip("x // tail");
        assert_eq!(kept.len(), 1);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "// tail");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_block_comment_removed_with_interior_newlines() {
        let (kept, tokens, diagnostics) = strip("a /* x\ny */ b");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].position, 2);
        assert_eq!(tokens[0].text, "/* x\ny */");
        // only the two words remain; the interior newline is gone
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].text, "a");
        assert_eq!(kept[1].text, "b");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let (kept, tokens, diagnostics) = strip("a /* never closed");
        assert_eq!(kept.len(), 1);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, CodeKind::Comment);
        assert_eq!(tokens[0].position, 2);
        assert_eq!(tokens[0].text, "/* never closed");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].position, 17);
        assert_eq!(diagnostics[0].length, 1);
    }

    #[test]
    fn test_comment_line_numbers() {
        let (_, tokens, _) = strip("a\nb\n// third line");
        assert_eq!(tokens[0].line, 2);
    }

    #[test]
    fn test_stray_block_close_is_left_for_the_parser() {
        let (kept, tokens, _) = strip("*/ x");
        assert!(tokens.is_empty());
        assert_eq!(kept[0].kind, LexemeKind::BlockClose);
    }
}
