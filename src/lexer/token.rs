use crate::symbol::Type;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    In,
    Out,
}

impl Keyword {
    /// The C++ rendering the emitter substitutes for the keyword.
    pub fn cpp(&self) -> &'static str {
        match self {
            Keyword::In => "cin >>",
            Keyword::Out => "cout <<",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::In => write!(f, "in"),
            Keyword::Out => write!(f, "out"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Assign,
    Plus,
    Minus,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Assign => write!(f, "="),
            Operator::Plus => write!(f, "+"),
            Operator::Minus => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Reserved(Keyword),
    Operator(Operator),
    Ident(String),
    Literal { ty: Type, text: String },
    Comment,
}

/// Kind code of a token; a line's signature is the ordered sequence of its
/// tokens' kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Read,
    Output,
    Assign,
    Arithmetic,
    Ident,
    Literal,
    Comment,
}

impl Token {
    pub fn kind(&self) -> Kind {
        match self {
            Token::Reserved(Keyword::In) => Kind::Read,
            Token::Reserved(Keyword::Out) => Kind::Output,
            Token::Operator(Operator::Assign) => Kind::Assign,
            Token::Operator(Operator::Plus) => Kind::Arithmetic,
            Token::Operator(Operator::Minus) => Kind::Arithmetic,
            Token::Ident(_) => Kind::Ident,
            Token::Literal { .. } => Kind::Literal,
            Token::Comment => Kind::Comment,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Reserved(keyword) => write!(f, "{}", keyword),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Literal { text, .. } => write!(f, "{}", text),
            Token::Comment => write!(f, "//"),
        }
    }
}
