use std::sync::Arc;

use tracing::{debug, trace};

use crate::diagnostics::Trail;
use crate::errors::{Error, ErrorKind, Location, Phase};
use crate::lexer::token::{Token, TokenKind};

/// Consecutive dispatches on the same character tolerated before the scan
/// is declared runaway.
pub const MAX_REPETITIONS: usize = 100_000;

/// Splits `source` into tokens.
///
/// Whitespace is dropped. Line breaks and soft-terminator colons become
/// `NEWLINE` tokens where they separate something. No `EOF` token is
/// appended.
pub fn tokenize(source: &str, file: &str) -> Result<Vec<Token>, Error> {
    let tokens = Scanner::new(source, file).run()?;
    debug!(file, tokens = tokens.len(), "Tokenized source");
    Ok(tokens)
}

/// Counts consecutive scanner dispatches on the same character.
#[derive(Default)]
struct RepetitionGuard {
    previous: Option<char>,
    repetitions: usize,
}

impl RepetitionGuard {
    /// Returns false once the limit is reached.
    fn observe(&mut self, c: char) -> bool {
        if self.previous == Some(c) {
            self.repetitions += 1;
        } else {
            self.repetitions = 0;
        }
        self.previous = Some(c);
        self.repetitions < MAX_REPETITIONS
    }
}

struct Scanner {
    chars: Vec<char>,
    lines: Vec<Arc<str>>,
    file: Arc<str>,
    pos: usize,
    column: usize,
    line: usize,
    tokens: Vec<Token>,
    trail: Trail,
}

impl Scanner {
    fn new(source: &str, file: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            lines: source
                .split('\n')
                .map(|line| Arc::from(line.trim_end_matches('\r')))
                .collect(),
            file: Arc::from(file),
            pos: 0,
            column: 0,
            line: 1,
            tokens: Vec::new(),
            trail: Trail::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, Error> {
        let mut open_brackets: Vec<Token> = Vec::new();
        let mut guard = RepetitionGuard::default();

        self.stage("tokenize", |s| {
            while let Some(c) = s.peek(0) {
                let at = s.here(1);
                match c {
                    ' ' | '\t' | '\r' => s.skip_whitespace(),
                    '\n' | ':' => s.tokenize_newline(),
                    c if TokenKind::is_operator_char(c)
                        && !(c == '.' && s.peek(1).is_some_and(|n| n.is_ascii_digit())) =>
                    {
                        s.stage("tokenize_operator", |s| s.tokenize_operator(&mut open_brackets))?
                    }
                    c if TokenKind::Number.symbols().contains(c) => {
                        s.stage("tokenize_number", |s| s.tokenize_number())?
                    }
                    c => {
                        return Err(s.error(
                            ErrorKind::SyntaxError,
                            format!("Unexpected character '{}'", c),
                            at,
                        ));
                    }
                }

                if !guard.observe(c) {
                    return Err(s.error(
                        ErrorKind::LexerError,
                        format!(
                            "Too many repetitions of the same character (>{})",
                            MAX_REPETITIONS
                        ),
                        at,
                    ));
                }
            }

            if let Some(open) = open_brackets.last() {
                return Err(s.error(
                    ErrorKind::SyntaxError,
                    format!("'{}' was never closed", open.value),
                    open.location(),
                ));
            }
            Ok(())
        })?;

        Ok(self.tokens)
    }

    /// Runs `f` with `name` on the trail, popping it on every exit.
    fn stage<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        self.trail.push(name);
        let result = f(self);
        self.trail.pop();
        result
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    fn break_line(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.column = 0;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(0), Some(' ' | '\t' | '\r')) {
            self.advance();
        }
    }

    fn source_line(&self, line: usize) -> Arc<str> {
        self.lines
            .get(line.saturating_sub(1))
            .cloned()
            .unwrap_or_else(|| Arc::from(""))
    }

    /// Location of the next `length` characters.
    fn here(&self, length: usize) -> Location {
        Location {
            file: self.file.clone(),
            line: self.line,
            column: self.column,
            length,
            offset: self.pos,
            source_line: self.source_line(self.line),
        }
    }

    fn error(&self, kind: ErrorKind, message: String, location: Location) -> Error {
        Error::new(kind, message, location, Phase::Lexer).with_trail(self.trail.snapshot())
    }

    fn push_token(&mut self, kind: TokenKind, value: String, at: Location) -> &Token {
        trace!(%kind, value = %value.escape_debug(), line = at.line, column = at.column, "Token");
        self.tokens.push(Token {
            kind,
            length: value.chars().count(),
            value,
            column: at.column,
            line: at.line,
            offset: at.offset,
            source_line: at.source_line,
            file: at.file,
        });
        &self.tokens[self.tokens.len() - 1]
    }

    fn follows_newline(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(token) => token.kind == TokenKind::Newline,
        }
    }

    fn tokenize_number(&mut self) -> Result<(), Error> {
        let start = self.here(0);
        let mut number = String::new();
        while let Some(c) = self.peek(0) {
            if !TokenKind::Number.symbols().contains(c) {
                break;
            }
            number.push(c);
            self.advance();
        }

        let dots = number.matches('.').count();
        let token = self.push_token(TokenKind::Number, number, start);
        if dots > 1 {
            let location = token.location();
            return Err(self.error(
                ErrorKind::SyntaxError,
                "Too many dots in float number".to_string(),
                location,
            ));
        }
        Ok(())
    }

    fn tokenize_operator(&mut self, open_brackets: &mut Vec<Token>) -> Result<(), Error> {
        let start = self.here(0);
        let mut operator = String::new();
        let mut kind = None;
        while let Some(c) = self.peek(0) {
            let mut candidate = operator.clone();
            candidate.push(c);
            match TokenKind::from_operator(&candidate) {
                Some(found) => {
                    operator = candidate;
                    kind = Some(found);
                    self.advance();
                }
                None => break,
            }
        }

        let Some(kind) = kind else {
            return Err(self.error(
                ErrorKind::SyntaxError,
                format!("Unexpected character '{}'", self.peek(0).unwrap_or('\0')),
                start,
            ));
        };

        let token = self.push_token(kind, operator, start).clone();
        if kind.is_opening_bracket() {
            open_brackets.push(token);
        } else if let Some(opener) = kind.opened_by() {
            match open_brackets.last() {
                Some(open) if open.kind == opener => {
                    open_brackets.pop();
                }
                _ => {
                    return Err(self.error(
                        ErrorKind::SyntaxError,
                        format!("Unmatched '{}'", token.value),
                        token.location(),
                    ));
                }
            }
        }
        Ok(())
    }

    fn tokenize_newline(&mut self) {
        self.trail.push("tokenize_newline");
        match self.peek(0) {
            Some(':') => self.tokenize_colon(),
            _ => {
                let at = self.here(1);
                let is_last = self.pos + 1 == self.chars.len();
                self.break_line();
                if !is_last && !self.follows_newline() {
                    self.push_token(TokenKind::Newline, "\n".to_string(), at);
                }
            }
        }
        self.trail.pop();
    }

    /// A colon ending its line is swallowed along with the breaks after it.
    /// Anywhere else it separates like a line break.
    fn tokenize_colon(&mut self) {
        let at = self.here(1);
        self.advance();
        self.skip_whitespace();

        match self.peek(0) {
            None => {}
            Some('\n') => {
                while let Some(c) = self.peek(0) {
                    match c {
                        '\n' => self.break_line(),
                        ' ' | '\t' | '\r' => self.advance(),
                        _ => break,
                    }
                }
            }
            Some(_) => {
                if !self.follows_newline() {
                    self.push_token(TokenKind::Newline, ":".to_string(), at);
                }
            }
        }
    }
}
