pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod symbol;
