//! Lexeme splitter for .proto source text using logos
//!
//! One pass turns the raw buffer into an ordered sequence of lexemes:
//! word-like runs, single punctuation marks, explicit newline markers, a
//! quote marker, and the comment introducers. Whitespace other than
//! newlines is dropped, as is any character that matches no pattern, so
//! splitting cannot fail on any input.

use logos::Logos;

/// Raw lexeme classes recognized by the splitter.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r]+")]
pub enum LexemeKind {
    /// A maximal run of word characters, optionally prefixed by a single
    /// `-` so negative numeric literals stay one unit.
    #[regex(r"-?[0-9A-Za-z_]+")]
    Word,

    // Comment introducers; the stripper consumes these before parsing.
    #[token("//")]
    LineComment,
    #[token("/*")]
    BlockOpen,
    #[token("*/")]
    BlockClose,

    // Punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("=")]
    Equals,
    #[token(";")]
    Semi,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(".")]
    Dot,
    #[token("+")]
    Plus,
    #[token(",")]
    Comma,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,

    /// Line break; kept as an explicit marker so downstream passes can
    /// count lines.
    #[token("\n")]
    Newline,

    /// A double quote; string bodies are assembled by the parser.
    #[token("\"")]
    Quote,
}

/// One raw, unclassified unit of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexeme<'src> {
    pub kind: LexemeKind,
    pub text: &'src str,
    pub start: usize,
}

impl<'src> Lexeme<'src> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset one past the last character of this lexeme.
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Split source text into lexemes.
pub fn split(source: &str) -> Vec<Lexeme<'_>> {
    LexemeKind::lexer(source)
        .spanned()
        .filter_map(|(result, span)| {
            let start = span.start;
            let end = span.end;
            result.ok().map(|kind| Lexeme {
                kind,
                text: &source[start..end],
                start,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LexemeKind> {
        split(source).into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        let lexemes = split("message M { }");
        assert_eq!(lexemes.len(), 4);
        assert_eq!(lexemes[0].text, "message");
        assert_eq!(lexemes[0].start, 0);
        assert_eq!(lexemes[1].text, "M");
        assert_eq!(lexemes[2].kind, LexemeKind::LBrace);
        assert_eq!(lexemes[3].kind, LexemeKind::RBrace);
    }

    #[test]
    fn test_negative_number_is_one_lexeme() {
        let lexemes = split("-42");
        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].text, "-42");
        assert_eq!(lexemes[0].kind, LexemeKind::Word);
    }

    #[test]
    fn test_float_literal_splits_into_pieces() {
        assert_eq!(
            kinds("1.2345E+3"),
            vec![
                LexemeKind::Word,
                LexemeKind::Dot,
                LexemeKind::Word,
                LexemeKind::Plus,
                LexemeKind::Word,
            ]
        );
    }

    #[test]
    fn test_negative_exponent_folds_into_word() {
        let lexemes = split("1.2345E-3");
        assert_eq!(lexemes.len(), 4);
        assert_eq!(lexemes[3].text, "-3");
    }

    #[test]
    fn test_newline_and_quote_markers() {
        assert_eq!(
            kinds("\"a\"\n"),
            vec![
                LexemeKind::Quote,
                LexemeKind::Word,
                LexemeKind::Quote,
                LexemeKind::Newline,
            ]
        );
    }

    #[test]
    fn test_unmatched_characters_are_dropped() {
        let lexemes = split("foo @ # bar");
        assert_eq!(lexemes.len(), 2);
        assert_eq!(lexemes[0].text, "foo");
        assert_eq!(lexemes[1].text, "bar");
        assert_eq!(lexemes[1].start, 8);
    }

    #[test]
    fn test_comment_introducers() {
        assert_eq!(
            kinds("// /* */"),
            vec![
                LexemeKind::LineComment,
                LexemeKind::BlockOpen,
                LexemeKind::BlockClose,
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(split("").is_empty());
    }

    #[test]
    fn test_spans_cover_source_positions() {
        let source = "optional  int32 x";
        for lexeme in split(source) {
            assert_eq!(&source[lexeme.start..lexeme.end()], lexeme.text);
        }
    }
}
