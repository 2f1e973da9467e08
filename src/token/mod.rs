use std::fmt::{self, Display};

use crate::error::location::{IntoSourceLoc, Traced};

/// Relational operators, they all share the `<lop>` slot in the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Eq, // =
    Ne, // <>
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    // --- Values
    /// Identifier names are sliced from whatever produced the token stream
    Identifier(&'a str),
    Integer(u64),
    RelOp(RelOp),

    // --- Keywords
    Program,
    Var,
    Arr,
    Procedure,
    Int,
    Float,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Read,
    Write,
    Return,
    Call,
    Odd,

    // --- Operators
    Assign,          // :=
    Add,             // +
    Sub,             // -
    Mul,             // *
    Div,             // /
    Semicolon,       // ;
    Comma,           // ,
    RoundParenOpen,  // (
    RoundParenClose, // )
    RectParenOpen,   // [
    RectParenClose,  // ]
}

/// The kind of a token without its payload, used for matching and in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    RelOp,
    Program,
    Var,
    Arr,
    Procedure,
    Int,
    Float,
    Begin,
    End,
    If,
    Then,
    Else,
    While,
    Do,
    Read,
    Write,
    Return,
    Call,
    Odd,
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Semicolon,
    Comma,
    RoundParenOpen,
    RoundParenClose,
    RectParenOpen,
    RectParenClose,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Identifier => return write!(f, "identifier"),
            Self::Integer => return write!(f, "integer"),
            Self::RelOp => return write!(f, "relational operator"),
            Self::Program => "program",
            Self::Var => "var",
            Self::Arr => "arr",
            Self::Procedure => "procedure",
            Self::Int => "int",
            Self::Float => "float",
            Self::Begin => "begin",
            Self::End => "end",
            Self::If => "if",
            Self::Then => "then",
            Self::Else => "else",
            Self::While => "while",
            Self::Do => "do",
            Self::Read => "read",
            Self::Write => "write",
            Self::Return => "return",
            Self::Call => "call",
            Self::Odd => "odd",
            Self::Assign => ":=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::RoundParenOpen => "(",
            Self::RoundParenClose => ")",
            Self::RectParenOpen => "[",
            Self::RectParenClose => "]",
        };
        write!(f, "`{s}`")
    }
}

impl<'src> Token<'src> {
    /// Wrap the token into `Traced<Token>`
    pub fn wrap_loc(self, loc: impl IntoSourceLoc<'src>) -> Traced<'src, Self> {
        Traced::new(self, loc.into_source_location())
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Identifier(_) => TokenKind::Identifier,
            Self::Integer(_) => TokenKind::Integer,
            Self::RelOp(_) => TokenKind::RelOp,
            Self::Program => TokenKind::Program,
            Self::Var => TokenKind::Var,
            Self::Arr => TokenKind::Arr,
            Self::Procedure => TokenKind::Procedure,
            Self::Int => TokenKind::Int,
            Self::Float => TokenKind::Float,
            Self::Begin => TokenKind::Begin,
            Self::End => TokenKind::End,
            Self::If => TokenKind::If,
            Self::Then => TokenKind::Then,
            Self::Else => TokenKind::Else,
            Self::While => TokenKind::While,
            Self::Do => TokenKind::Do,
            Self::Read => TokenKind::Read,
            Self::Write => TokenKind::Write,
            Self::Return => TokenKind::Return,
            Self::Call => TokenKind::Call,
            Self::Odd => TokenKind::Odd,
            Self::Assign => TokenKind::Assign,
            Self::Add => TokenKind::Add,
            Self::Sub => TokenKind::Sub,
            Self::Mul => TokenKind::Mul,
            Self::Div => TokenKind::Div,
            Self::Semicolon => TokenKind::Semicolon,
            Self::Comma => TokenKind::Comma,
            Self::RoundParenOpen => TokenKind::RoundParenOpen,
            Self::RoundParenClose => TokenKind::RoundParenClose,
            Self::RectParenOpen => TokenKind::RectParenOpen,
            Self::RectParenClose => TokenKind::RectParenClose,
        }
    }

    pub fn expect_identifier(&self) -> Option<&'src str> {
        match self {
            Token::Identifier(s) => Some(s),
            _ => None,
        }
    }

    pub fn expect_integer(&self) -> Option<u64> {
        match self {
            Token::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Classify a single word that has already been cut out of the source.
    /// Returns `None` if the word is not a keyword, an operator, a decimal integer that fits in
    /// `u64`, or an identifier (a letter followed by letters, digits or `_`).
    pub fn from_word(word: &'src str) -> Option<Self> {
        let token = match word {
            "program" => Token::Program,
            "var" => Token::Var,
            "arr" => Token::Arr,
            "procedure" => Token::Procedure,
            "int" => Token::Int,
            "float" => Token::Float,
            "begin" => Token::Begin,
            "end" => Token::End,
            "if" => Token::If,
            "then" => Token::Then,
            "else" => Token::Else,
            "while" => Token::While,
            "do" => Token::Do,
            "read" => Token::Read,
            "write" => Token::Write,
            "return" => Token::Return,
            "call" => Token::Call,
            "odd" => Token::Odd,
            ":=" => Token::Assign,
            "+" => Token::Add,
            "-" => Token::Sub,
            "*" => Token::Mul,
            "/" => Token::Div,
            ";" => Token::Semicolon,
            "," => Token::Comma,
            "(" => Token::RoundParenOpen,
            ")" => Token::RoundParenClose,
            "[" => Token::RectParenOpen,
            "]" => Token::RectParenClose,
            "=" => Token::RelOp(RelOp::Eq),
            "<>" => Token::RelOp(RelOp::Ne),
            "<" => Token::RelOp(RelOp::Lt),
            "<=" => Token::RelOp(RelOp::Le),
            ">" => Token::RelOp(RelOp::Gt),
            ">=" => Token::RelOp(RelOp::Ge),
            _ => {
                let mut chars = word.chars();
                let first = chars.next()?;
                if first.is_ascii_digit() {
                    return word.parse().ok().map(Token::Integer);
                }
                if first.is_ascii_alphabetic()
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    Token::Identifier(word)
                } else {
                    return None;
                }
            }
        };
        Some(token)
    }
}
