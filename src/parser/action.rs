use crate::lexer::Token;

/// What a classified line does. Produced and consumed within one pass,
/// never retained afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum LineAction {
    Assign { name: String, rhs: Vec<Token> },
    Output { expr: Vec<Token> },
    ReadNumber { name: String },
}
