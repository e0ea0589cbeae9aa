use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use lazy_static::lazy_static;

use crate::errors::Location;

/// Named partition of the token kinds, used by the lexer to pick a
/// sub-scanner for the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenGroup {
    Literals,
    Operators,
    Others,
}

impl TokenGroup {
    pub fn members(&self) -> &'static [TokenKind] {
        match self {
            TokenGroup::Literals => &[TokenKind::Number],
            TokenGroup::Operators => &[
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Multiply,
                TokenKind::Divide,
                TokenKind::Modulo,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Point,
            ],
            TokenGroup::Others => &[TokenKind::Newline, TokenKind::Eof],
        }
    }
}

impl fmt::Display for TokenGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenGroup::Literals => "LITERALS",
            TokenGroup::Operators => "OPERATORS",
            TokenGroup::Others => "OTHERS",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,

    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    Point,

    Newline,
    Eof,
}

lazy_static! {
    static ref OPERATORS: HashMap<&'static str, TokenKind> = TokenGroup::Operators
        .members()
        .iter()
        .map(|kind| (kind.symbols(), *kind))
        .collect();
}

impl TokenKind {
    /// The defining symbol set of this kind.
    ///
    /// Operators map to their literal symbol. `Number` maps to the characters
    /// a numeral may contain and `Newline` to both of its spellings.
    pub fn symbols(&self) -> &'static str {
        match self {
            TokenKind::Number => "0123456789.",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Multiply => "*",
            TokenKind::Divide => "/",
            TokenKind::Modulo => "%",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Point => ".",
            TokenKind::Newline => "\n:",
            TokenKind::Eof => "\0",
        }
    }

    pub fn group(&self) -> TokenGroup {
        match self {
            TokenKind::Number => TokenGroup::Literals,
            TokenKind::Newline | TokenKind::Eof => TokenGroup::Others,
            _ => TokenGroup::Operators,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Point => "POINT",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
        }
    }

    /// Looks up the operator spelled exactly `text`.
    pub fn from_operator(text: &str) -> Option<TokenKind> {
        OPERATORS.get(text).copied()
    }

    pub fn is_operator_char(c: char) -> bool {
        let mut buf = [0u8; 4];
        OPERATORS.contains_key(&*c.encode_utf8(&mut buf))
    }

    pub fn is_opening_bracket(&self) -> bool {
        matches!(self, TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace)
    }

    /// The opening bracket this kind closes, if it is a closing bracket.
    pub fn opened_by(&self) -> Option<TokenKind> {
        match self {
            TokenKind::RParen => Some(TokenKind::LParen),
            TokenKind::RBracket => Some(TokenKind::LBracket),
            TokenKind::RBrace => Some(TokenKind::LBrace),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexeme with its position.
///
/// `column` is 0-based and `line` 1-based, both counted in characters.
/// `source_line` is the full text of the line the token sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub length: usize,
    pub column: usize,
    pub line: usize,
    pub offset: usize,
    pub source_line: Arc<str>,
    pub file: Arc<str>,
}

impl Token {
    pub fn location(&self) -> Location {
        Location {
            file: self.file.clone(),
            line: self.line,
            column: self.column,
            length: self.length,
            offset: self.offset,
            source_line: self.source_line.clone(),
        }
    }

    /// Column one past the last character of this token.
    pub fn end_column(&self) -> usize {
        self.column + self.length
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {:?})", self.kind, self.value)
    }
}
