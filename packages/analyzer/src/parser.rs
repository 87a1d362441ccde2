//! Recursive-descent parser for .proto source text.
//!
//! One method per grammar production. The parser never panics and never
//! gives up at the first problem: a failure records one diagnostic at
//! the most specific offset available, aborts only the statement that
//! contains it, and the top-level loop resumes at the next recognizable
//! keyword so the rest of the buffer still produces tokens.

use crate::classify::{
    is_field_rule, is_identifier, is_integer, is_positive_int32, scalar_type_of, ScalarType,
};
use crate::comments::strip_comments;
use crate::error::{DiagnosticSink, ParseResult, SyntaxError};
use crate::lexer::{split, Lexeme, LexemeKind};
use crate::token::{Analysis, CodeKind, Token};

/// Top-level statement keywords, dispatched by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopLevelKeyword {
    Syntax,
    Import,
    Package,
    Option,
    Message,
    Enum,
    Service,
    Extend,
}

impl TopLevelKeyword {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "syntax" => Some(Self::Syntax),
            "import" => Some(Self::Import),
            "package" => Some(Self::Package),
            "option" => Some(Self::Option),
            "message" => Some(Self::Message),
            "enum" => Some(Self::Enum),
            "service" => Some(Self::Service),
            "extend" => Some(Self::Extend),
            _ => None,
        }
    }
}

/// Message-body keywords; anything else falls through to field parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKeyword {
    Message,
    Enum,
    Extensions,
    Extend,
    Option,
    Oneof,
}

impl BodyKeyword {
    fn from_text(text: &str) -> Option<Self> {
        match text {
            "message" => Some(Self::Message),
            "enum" => Some(Self::Enum),
            "extensions" => Some(Self::Extensions),
            "extend" => Some(Self::Extend),
            "option" => Some(Self::Option),
            "oneof" => Some(Self::Oneof),
            _ => None,
        }
    }
}

/// Validation context for one field or enum value, discarded when its
/// statement completes.
pub(crate) struct FieldContext {
    pub(crate) scalar_type: ScalarType,
    pub(crate) has_default_option: bool,
}

/// Parse state for one analysis pass.
///
/// Holds the post-stripping lexeme sequence, the cursor, the line
/// counter and the accumulated output. Created fresh per pass and
/// consumed by it; concurrent parses use separate values.
pub struct Parser<'src> {
    source: &'src str,
    lexemes: Vec<Lexeme<'src>>,
    cursor: usize,
    line: usize,
    has_package_statement: bool,
    tokens: Vec<Token>,
    diagnostics: DiagnosticSink,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let raw = split(source);
        let mut tokens = Vec::new();
        let mut diagnostics = DiagnosticSink::new();
        let lexemes = strip_comments(source, &raw, &mut tokens, &mut diagnostics);
        Self {
            source,
            lexemes,
            cursor: 0,
            line: 0,
            has_package_statement: false,
            tokens,
            diagnostics,
        }
    }

    /// Parse the whole buffer and return every token and diagnostic
    /// produced.
    pub fn analyze(mut self) -> Analysis {
        loop {
            self.skip_newlines();
            if self.cursor >= self.lexemes.len() {
                break;
            }
            if self.parse_statement().is_err() {
                self.recover_to_top_level();
            }
        }
        self.finish()
    }

    fn finish(self) -> Analysis {
        let newlines: Vec<usize> = self
            .lexemes
            .iter()
            .filter(|l| l.kind == LexemeKind::Newline)
            .map(|l| l.start)
            .collect();
        let mut diagnostics = self.diagnostics.into_inner();
        for diagnostic in &mut diagnostics {
            if diagnostic.line > 0 && diagnostic.line <= newlines.len() {
                let line_start = newlines[diagnostic.line - 1] + 1;
                diagnostic.offset = diagnostic.position.saturating_sub(line_start);
            }
        }
        Analysis {
            tokens: self.tokens,
            diagnostics,
            final_cursor: self.cursor,
        }
    }

    // Cursor helpers

    pub(crate) fn peek(&self) -> Option<Lexeme<'src>> {
        self.lexemes.get(self.cursor).copied()
    }

    pub(crate) fn advance(&mut self) {
        self.cursor += 1;
    }

    fn skip_newlines(&mut self) {
        while let Some(lexeme) = self.peek() {
            if lexeme.kind != LexemeKind::Newline {
                break;
            }
            self.line += 1;
            self.cursor += 1;
        }
    }

    /// Position one past the end of the last lexeme; the anchor for
    /// end-of-file diagnostics.
    fn end_position(&self) -> usize {
        self.lexemes.last().map(|l| l.end()).unwrap_or(0)
    }

    // Failure helpers: record a diagnostic, hand the error back for `?`

    fn fail(&mut self, error: SyntaxError) -> SyntaxError {
        self.diagnostics
            .report(self.line, error.position(), error.length(), error.to_string());
        error
    }

    fn fail_eof(&mut self, expected: &str) -> SyntaxError {
        let error = SyntaxError::eof(self.end_position(), expected);
        self.fail(error)
    }

    fn fail_at(&mut self, lexeme: Lexeme<'src>, expected: &str) -> SyntaxError {
        let error = SyntaxError::unexpected(lexeme.start, lexeme.len(), expected, lexeme.text);
        self.fail(error)
    }

    pub(crate) fn report(&mut self, position: usize, length: usize, message: impl Into<String>) {
        self.diagnostics.report(self.line, position, length, message);
    }

    /// Next significant lexeme, without consuming it. Embedded newlines
    /// are skipped and counted; end of input is a recorded failure.
    fn next(&mut self, expected: &str) -> ParseResult<Lexeme<'src>> {
        self.skip_newlines();
        match self.peek() {
            Some(lexeme) => Ok(lexeme),
            None => Err(self.fail_eof(expected)),
        }
    }

    pub(crate) fn expect_word(&mut self, expected: &str) -> ParseResult<Lexeme<'src>> {
        let lexeme = self.next(expected)?;
        if lexeme.kind != LexemeKind::Word {
            return Err(self.fail_at(lexeme, expected));
        }
        self.advance();
        Ok(lexeme)
    }

    fn expect_punct(&mut self, kind: LexemeKind, expected: &str) -> ParseResult<()> {
        let lexeme = self.next(expected)?;
        if lexeme.kind != kind {
            return Err(self.fail_at(lexeme, expected));
        }
        self.advance();
        Ok(())
    }

    /// Consume the given punctuation if it is next.
    fn eat_punct(&mut self, kind: LexemeKind) -> bool {
        self.skip_newlines();
        match self.peek() {
            Some(lexeme) if lexeme.kind == kind => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    // Token emission

    pub(crate) fn push_token(&mut self, kind: CodeKind, lexeme: Lexeme<'src>) {
        self.tokens
            .push(Token::new(self.line, lexeme.start, lexeme.len(), kind));
    }

    pub(crate) fn push_text_token(
        &mut self,
        kind: CodeKind,
        position: usize,
        length: usize,
        text: String,
    ) {
        self.tokens
            .push(Token::with_text(self.line, position, length, text, kind));
    }

    // Statement productions

    fn parse_statement(&mut self) -> ParseResult<()> {
        let lexeme = match self.peek() {
            Some(lexeme) => lexeme,
            None => return Ok(()),
        };
        let keyword = match lexeme.kind {
            LexemeKind::Word => TopLevelKeyword::from_text(lexeme.text),
            _ => None,
        };
        match keyword {
            Some(TopLevelKeyword::Syntax) => self.parse_syntax(lexeme),
            Some(TopLevelKeyword::Import) => self.parse_import(lexeme),
            Some(TopLevelKeyword::Package) => self.parse_package(lexeme),
            Some(TopLevelKeyword::Option) => self.parse_option(lexeme),
            Some(TopLevelKeyword::Message) => self.parse_message(lexeme),
            Some(TopLevelKeyword::Enum) => self.parse_enum(lexeme),
            Some(TopLevelKeyword::Service) => self.parse_service(lexeme),
            Some(TopLevelKeyword::Extend) => self.parse_extend(lexeme),
            None => {
                let error = self.fail_at(lexeme, "a top-level statement");
                self.advance();
                Err(error)
            }
        }
    }

    /// After a failed statement, resume at the next recognizable
    /// top-level keyword so the rest of the file still produces tokens.
    fn recover_to_top_level(&mut self) {
        while let Some(lexeme) = self.peek() {
            match lexeme.kind {
                LexemeKind::Newline => {
                    self.line += 1;
                    self.advance();
                }
                LexemeKind::Word if TopLevelKeyword::from_text(lexeme.text).is_some() => return,
                _ => self.advance(),
            }
        }
    }

    /// `syntax = "proto2|proto3" ;`
    fn parse_syntax(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        self.advance();
        self.expect_punct(LexemeKind::Equals, "'='")?;
        let open = self.next("a quoted syntax level")?;
        if open.kind != LexemeKind::Quote {
            return Err(self.fail_at(open, "a quoted syntax level"));
        }
        self.advance();
        let level = self.next("'proto2' or 'proto3'")?;
        if level.kind != LexemeKind::Word || !matches!(level.text, "proto2" | "proto3") {
            return Err(self.fail_at(level, "'proto2' or 'proto3'"));
        }
        self.advance();
        let close = self.next("'\"'")?;
        if close.kind != LexemeKind::Quote {
            return Err(self.fail_at(close, "'\"'"));
        }
        self.advance();
        self.push_text_token(
            CodeKind::String,
            open.start,
            close.end() - open.start,
            level.text.to_string(),
        );
        self.expect_punct(LexemeKind::Semi, "';'")
    }

    /// `import [public|weak] "path" ;`
    fn parse_import(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        self.advance();
        let modifier = self.next("an import path")?;
        if modifier.kind == LexemeKind::Word && matches!(modifier.text, "public" | "weak") {
            self.push_token(CodeKind::Keyword, modifier);
            self.advance();
        }
        self.read_quoted_string("an import path")?;
        self.expect_punct(LexemeKind::Semi, "';'")
    }

    /// `package Ident(.Ident)* ;`, at most one per file.
    fn parse_package(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        if self.has_package_statement {
            self.report(
                keyword.start,
                keyword.len(),
                "only one package statement is allowed per file",
            );
        }
        self.has_package_statement = true;
        self.advance();
        self.parse_dotted_name(CodeKind::Namespace, "a package name")?;
        self.expect_punct(LexemeKind::Semi, "';'")
    }

    /// `option dotted.name = value ;`
    fn parse_option(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        self.advance();
        self.parse_dotted_name(CodeKind::Keyword, "an option name")?;
        self.expect_punct(LexemeKind::Equals, "'='")?;
        let value = self.next("an option value")?;
        match value.kind {
            LexemeKind::Quote => {
                self.read_quoted_string("an option value")?;
            }
            LexemeKind::Word => {
                self.push_option_value(value);
                self.advance();
            }
            _ => return Err(self.fail_at(value, "an option value")),
        }
        self.expect_punct(LexemeKind::Semi, "';'")
    }

    /// Classify a bare option value: integer, bool, or an enum-like
    /// constant.
    fn push_option_value(&mut self, value: Lexeme<'src>) {
        if is_integer(value.text) {
            self.push_token(CodeKind::Number, value);
        } else if matches!(value.text, "true" | "false") {
            self.push_token(CodeKind::Keyword, value);
        } else {
            self.push_token(CodeKind::Enumerant, value);
        }
    }

    /// `message Ident { (message|enum|extensions|extend|option|oneof|field)* }`
    fn parse_message(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        self.advance();
        let name = self.expect_word("a message name")?;
        if !is_identifier(name.text) {
            return Err(self.fail_at(name, "a message name"));
        }
        self.push_token(CodeKind::SymbolDefinition, name);
        self.expect_punct(LexemeKind::LBrace, "'{'")?;
        self.parse_message_body()
    }

    fn parse_message_body(&mut self) -> ParseResult<()> {
        loop {
            self.skip_newlines();
            let lexeme = match self.peek() {
                Some(lexeme) => lexeme,
                None => return Err(self.fail_eof("'}'")),
            };
            if lexeme.kind == LexemeKind::RBrace {
                self.advance();
                return Ok(());
            }
            let keyword = match lexeme.kind {
                LexemeKind::Word => BodyKeyword::from_text(lexeme.text),
                _ => None,
            };
            match keyword {
                Some(BodyKeyword::Message) => self.parse_message(lexeme)?,
                Some(BodyKeyword::Enum) => self.parse_enum(lexeme)?,
                Some(BodyKeyword::Extensions) => self.parse_extensions(lexeme)?,
                Some(BodyKeyword::Extend) => self.parse_extend(lexeme)?,
                Some(BodyKeyword::Option) => self.parse_option(lexeme)?,
                Some(BodyKeyword::Oneof) => self.parse_oneof(lexeme)?,
                None => self.parse_field(lexeme)?,
            }
        }
    }

    /// `(required|optional|repeated) Type Ident = Int [options] ;`
    fn parse_field(&mut self, first: Lexeme<'src>) -> ParseResult<()> {
        if first.kind != LexemeKind::Word || !is_field_rule(first.text) {
            return Err(self.fail_at(first, "'required', 'optional' or 'repeated'"));
        }
        self.push_token(CodeKind::FieldRule, first);
        self.advance();
        self.parse_field_declaration()
    }

    /// Everything after the field rule; also the shape of a oneof
    /// member.
    fn parse_field_declaration(&mut self) -> ParseResult<()> {
        let type_lexeme = self.expect_word("a field type")?;
        let scalar_type = scalar_type_of(type_lexeme.text);
        if scalar_type != ScalarType::Unknown {
            self.push_token(CodeKind::Keyword, type_lexeme);
        } else {
            if !is_identifier(type_lexeme.text) {
                return Err(self.fail_at(type_lexeme, "a field type"));
            }
            self.push_token(CodeKind::SymbolReference, type_lexeme);
            while self.eat_punct(LexemeKind::Dot) {
                let part = self.expect_word("a type name")?;
                if !is_identifier(part.text) {
                    return Err(self.fail_at(part, "a type name"));
                }
                self.push_token(CodeKind::SymbolReference, part);
            }
        }

        let name = self.expect_word("a field name")?;
        if !is_identifier(name.text) {
            return Err(self.fail_at(name, "a field name"));
        }
        self.push_token(CodeKind::SymbolDefinition, name);
        self.expect_punct(LexemeKind::Equals, "'='")?;

        self.skip_newlines();
        match self.peek() {
            None => return Err(self.fail_eof("a field number")),
            Some(number) if number.kind == LexemeKind::Word => {
                if !is_positive_int32(number.text) {
                    self.report(
                        number.start,
                        number.len(),
                        "field number must be a non-negative 32-bit integer",
                    );
                }
                self.push_token(CodeKind::Number, number);
                self.advance();
            }
            Some(number) => {
                // no number at all; record it and keep hunting for the
                // terminator so the enclosing body continues
                self.report(
                    number.start,
                    number.len(),
                    "field number must be a non-negative 32-bit integer",
                );
            }
        }

        let mut context = FieldContext {
            scalar_type,
            has_default_option: false,
        };
        if self.eat_punct(LexemeKind::LBracket) {
            self.parse_field_options(&mut context)?;
        }
        self.finish_field_statement()
    }

    /// Consume the trailing `;`, scanning past junk if needed so the
    /// enclosing body keeps parsing.
    fn finish_field_statement(&mut self) -> ParseResult<()> {
        self.skip_newlines();
        match self.peek() {
            None => return Err(self.fail_eof("';'")),
            Some(lexeme) if lexeme.kind == LexemeKind::Semi => {
                self.advance();
                return Ok(());
            }
            Some(lexeme) => {
                self.report(lexeme.start, lexeme.len(), "expected ';'");
            }
        }
        loop {
            match self.peek() {
                None => return Err(self.fail_eof("';'")),
                Some(lexeme) if lexeme.kind == LexemeKind::Semi => {
                    self.advance();
                    return Ok(());
                }
                Some(lexeme) if lexeme.kind == LexemeKind::RBrace => return Ok(()),
                Some(lexeme) if lexeme.kind == LexemeKind::Newline => {
                    self.line += 1;
                    self.advance();
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// `[ name = value (, name = value)* ]`; `default` delegates to the
    /// default-value sub-parser.
    pub(crate) fn parse_field_options(&mut self, context: &mut FieldContext) -> ParseResult<()> {
        loop {
            let name = self.expect_word("an option name")?;
            if name.text == "default" {
                self.push_token(CodeKind::Keyword, name);
                if context.has_default_option {
                    self.report(name.start, name.len(), "duplicate 'default' option");
                }
                context.has_default_option = true;
                self.expect_punct(LexemeKind::Equals, "'='")?;
                self.parse_default_value(context)?;
            } else {
                if !is_identifier(name.text) {
                    return Err(self.fail_at(name, "an option name"));
                }
                self.push_token(CodeKind::Keyword, name);
                self.expect_punct(LexemeKind::Equals, "'='")?;
                let value = self.next("an option value")?;
                match value.kind {
                    LexemeKind::Quote => {
                        self.read_quoted_string("an option value")?;
                    }
                    LexemeKind::Word => {
                        self.push_option_value(value);
                        self.advance();
                    }
                    _ => return Err(self.fail_at(value, "an option value")),
                }
            }
            let separator = self.next("',' or ']'")?;
            match separator.kind {
                LexemeKind::Comma => self.advance(),
                LexemeKind::RBracket => {
                    self.advance();
                    return Ok(());
                }
                _ => return Err(self.fail_at(separator, "',' or ']'")),
            }
        }
    }

    /// `enum Ident { (option ;)* (Ident = Int [options] ;)* }`
    fn parse_enum(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        self.advance();
        let name = self.expect_word("an enum name")?;
        if !is_identifier(name.text) {
            return Err(self.fail_at(name, "an enum name"));
        }
        self.push_token(CodeKind::SymbolDefinition, name);
        self.expect_punct(LexemeKind::LBrace, "'{'")?;
        loop {
            self.skip_newlines();
            let lexeme = match self.peek() {
                Some(lexeme) => lexeme,
                None => return Err(self.fail_eof("'}'")),
            };
            if lexeme.kind == LexemeKind::RBrace {
                self.advance();
                return Ok(());
            }
            if lexeme.kind == LexemeKind::Word && lexeme.text == "option" {
                self.parse_option(lexeme)?;
            } else {
                self.parse_enum_value(lexeme)?;
            }
        }
    }

    fn parse_enum_value(&mut self, name: Lexeme<'src>) -> ParseResult<()> {
        if name.kind != LexemeKind::Word || !is_identifier(name.text) {
            return Err(self.fail_at(name, "an enum value name"));
        }
        self.push_token(CodeKind::Enumerant, name);
        self.advance();
        self.expect_punct(LexemeKind::Equals, "'='")?;
        let number = self.expect_word("an integer value")?;
        if !is_integer(number.text) {
            self.report(number.start, number.len(), "enum value must be an integer");
        }
        self.push_token(CodeKind::Number, number);
        let mut context = FieldContext {
            scalar_type: ScalarType::Unknown,
            has_default_option: false,
        };
        if self.eat_punct(LexemeKind::LBracket) {
            self.parse_field_options(&mut context)?;
        }
        self.expect_punct(LexemeKind::Semi, "';'")
    }

    /// `service Ident { (option ;|rpc ...)* }`
    fn parse_service(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        self.advance();
        let name = self.expect_word("a service name")?;
        if !is_identifier(name.text) {
            return Err(self.fail_at(name, "a service name"));
        }
        self.push_token(CodeKind::SymbolDefinition, name);
        self.expect_punct(LexemeKind::LBrace, "'{'")?;
        loop {
            self.skip_newlines();
            let lexeme = match self.peek() {
                Some(lexeme) => lexeme,
                None => return Err(self.fail_eof("'}'")),
            };
            match lexeme.kind {
                LexemeKind::RBrace => {
                    self.advance();
                    return Ok(());
                }
                LexemeKind::Word if lexeme.text == "option" => self.parse_option(lexeme)?,
                LexemeKind::Word if lexeme.text == "rpc" => self.parse_rpc(lexeme)?,
                _ => return Err(self.fail_at(lexeme, "'rpc', 'option' or '}'")),
            }
        }
    }

    /// `rpc Ident ( Type ) returns ( Type ) ;`
    fn parse_rpc(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::Keyword, keyword);
        self.advance();
        let name = self.expect_word("an rpc name")?;
        if !is_identifier(name.text) {
            return Err(self.fail_at(name, "an rpc name"));
        }
        self.push_token(CodeKind::SymbolDefinition, name);
        self.expect_punct(LexemeKind::LParen, "'('")?;
        self.parse_dotted_name(CodeKind::SymbolReference, "a request type")?;
        self.expect_punct(LexemeKind::RParen, "')'")?;
        let returns = self.expect_word("'returns'")?;
        if returns.text != "returns" {
            return Err(self.fail_at(returns, "'returns'"));
        }
        self.push_token(CodeKind::Keyword, returns);
        self.expect_punct(LexemeKind::LParen, "'('")?;
        self.parse_dotted_name(CodeKind::SymbolReference, "a response type")?;
        self.expect_punct(LexemeKind::RParen, "')'")?;
        self.expect_punct(LexemeKind::Semi, "';'")
    }

    /// `extend Type { field+ }`
    fn parse_extend(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::TopLevelCommand, keyword);
        self.advance();
        self.parse_dotted_name(CodeKind::SymbolReference, "a message type")?;
        self.expect_punct(LexemeKind::LBrace, "'{'")?;
        let mut fields = 0usize;
        loop {
            self.skip_newlines();
            let lexeme = match self.peek() {
                Some(lexeme) => lexeme,
                None => return Err(self.fail_eof("'}'")),
            };
            if lexeme.kind == LexemeKind::RBrace {
                if fields == 0 {
                    self.report(
                        lexeme.start,
                        lexeme.len(),
                        "extend block must declare at least one field",
                    );
                }
                self.advance();
                return Ok(());
            }
            self.parse_field(lexeme)?;
            fields += 1;
        }
    }

    /// `oneof Ident { member+ }`; members are field declarations
    /// without a field rule.
    fn parse_oneof(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::Keyword, keyword);
        self.advance();
        let name = self.expect_word("a oneof name")?;
        if !is_identifier(name.text) {
            return Err(self.fail_at(name, "a oneof name"));
        }
        self.push_token(CodeKind::SymbolDefinition, name);
        self.expect_punct(LexemeKind::LBrace, "'{'")?;
        loop {
            self.skip_newlines();
            let lexeme = match self.peek() {
                Some(lexeme) => lexeme,
                None => return Err(self.fail_eof("'}'")),
            };
            if lexeme.kind == LexemeKind::RBrace {
                self.advance();
                return Ok(());
            }
            self.parse_field_declaration()?;
        }
    }

    /// `extensions Int to (Int|max) (, Int to (Int|max))* ;`
    fn parse_extensions(&mut self, keyword: Lexeme<'src>) -> ParseResult<()> {
        self.push_token(CodeKind::Keyword, keyword);
        self.advance();
        loop {
            let lower = self.expect_word("a range bound")?;
            if !is_positive_int32(lower.text) {
                self.report(
                    lower.start,
                    lower.len(),
                    "extension range bounds must be non-negative",
                );
            }
            self.push_token(CodeKind::Number, lower);
            let to = self.expect_word("'to'")?;
            if to.text != "to" {
                return Err(self.fail_at(to, "'to'"));
            }
            self.push_token(CodeKind::Keyword, to);
            let upper = self.expect_word("a range bound or 'max'")?;
            if upper.text == "max" {
                self.push_token(CodeKind::Keyword, upper);
            } else {
                if !is_positive_int32(upper.text) {
                    self.report(
                        upper.start,
                        upper.len(),
                        "extension range bounds must be non-negative",
                    );
                }
                self.push_token(CodeKind::Number, upper);
            }
            let separator = self.next("',' or ';'")?;
            match separator.kind {
                LexemeKind::Comma => self.advance(),
                LexemeKind::Semi => {
                    self.advance();
                    return Ok(());
                }
                _ => return Err(self.fail_at(separator, "',' or ';'")),
            }
        }
    }

    /// `Ident ('.' Ident)*`, each component classified with `kind`.
    fn parse_dotted_name(&mut self, kind: CodeKind, expected: &str) -> ParseResult<()> {
        loop {
            let lexeme = self.expect_word(expected)?;
            if !is_identifier(lexeme.text) {
                return Err(self.fail_at(lexeme, expected));
            }
            self.push_token(kind, lexeme);
            if !self.eat_punct(LexemeKind::Dot) {
                return Ok(());
            }
        }
    }

    /// Shared quoted-string reader.
    ///
    /// Expects the next significant lexeme to be an opening `"`. Emits a
    /// String token in every outcome; when no closing quote appears
    /// before a `;`, `]`, newline or the end of input, the token covers
    /// the consumed text, a diagnostic lands one past it, and the
    /// boundary lexeme is left for the caller rather than raising a hard
    /// failure.
    pub(crate) fn read_quoted_string(&mut self, expected: &str) -> ParseResult<()> {
        let open = self.next(expected)?;
        if open.kind != LexemeKind::Quote {
            return Err(self.fail_at(open, expected));
        }
        self.advance();
        let mut last_end = open.end();
        loop {
            match self.peek() {
                None => {
                    self.push_text_token(
                        CodeKind::String,
                        open.start,
                        last_end - open.start,
                        self.source[open.end()..last_end].to_string(),
                    );
                    self.report(last_end, 1, "string is not terminated");
                    return Ok(());
                }
                Some(lexeme) if lexeme.kind == LexemeKind::Quote => {
                    self.advance();
                    self.push_text_token(
                        CodeKind::String,
                        open.start,
                        lexeme.end() - open.start,
                        self.source[open.end()..lexeme.start].to_string(),
                    );
                    return Ok(());
                }
                Some(lexeme)
                    if matches!(
                        lexeme.kind,
                        LexemeKind::Newline | LexemeKind::Semi | LexemeKind::RBracket
                    ) =>
                {
                    self.push_text_token(
                        CodeKind::String,
                        open.start,
                        last_end - open.start,
                        self.source[open.end()..last_end].to_string(),
                    );
                    self.report(last_end, 1, "string is not terminated");
                    return Ok(());
                }
                Some(lexeme) => {
                    last_end = lexeme.end();
                    self.advance();
                }
            }
        }
    }
}

/// Analyze a whole .proto buffer: split, strip comments, parse, and
/// return the classified tokens, the diagnostics, and the final cursor
/// index.
pub fn analyze(source: &str) -> Analysis {
    Parser::new(source).analyze()
}

/// Run only the splitter and the comment stripper, returning the Comment
/// tokens. Callers use this to decide whether an offset falls inside a
/// comment without paying for a full parse.
pub fn analyze_comments_only(source: &str) -> Vec<Token> {
    let raw = split(source);
    let mut tokens = Vec::new();
    let mut diagnostics = DiagnosticSink::new();
    strip_comments(source, &raw, &mut tokens, &mut diagnostics);
    tokens
}
