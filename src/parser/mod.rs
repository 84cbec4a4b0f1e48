mod action;
mod parser;

pub use action::LineAction;
pub use parser::{Line, Parser};
