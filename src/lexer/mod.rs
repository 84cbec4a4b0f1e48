mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{Keyword, Kind, Operator, Token};
