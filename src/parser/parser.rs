use crate::diagnostics::{Cursor, Diagnostic, Diagnostics};
use crate::lexer::{Kind, Lexer, Token};
use crate::parser::action::LineAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Assign,
    Output,
    ReadNumber,
}

// Signatures that must match a line's full kind sequence.
static STATIC_FORMS: &[(&[Kind], Form)] = &[(&[Kind::Read, Kind::Ident], Form::ReadNumber)];

// Signatures that must match a line's leading kinds; the remainder is a free
// expression. Scanned in order, first match wins.
static PREFIX_FORMS: &[(&[Kind], Form)] = &[
    (&[Kind::Output], Form::Output),
    (&[Kind::Ident, Kind::Assign], Form::Assign),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub number: usize,
    pub action: LineAction,
}

/// Line classifier and per-line driver over a whole source text.
#[derive(Debug, Default)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            lexer: Lexer::new(),
        }
    }

    /// Lexes and classifies every line of `source`, reporting diagnostics
    /// and skipping the lines that produced them. Blank and comment-only
    /// lines contribute nothing.
    pub fn parse(&self, source: &str, diagnostics: &mut Diagnostics) -> Vec<Line> {
        let mut cursor = Cursor::new();
        let mut lines = vec![];

        for text in source.lines() {
            cursor.line += 1;

            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let tokens = match self.lexer.lex_line(text, &mut cursor) {
                Ok(tokens) => tokens,
                Err(diagnostic) => {
                    diagnostics.report(diagnostic);
                    continue;
                }
            };

            match classify(tokens, &cursor) {
                Ok(Some(action)) => lines.push(Line {
                    number: cursor.line,
                    action,
                }),
                Ok(None) => {}
                Err(diagnostic) => diagnostics.report(diagnostic),
            }
        }

        lines
    }
}

/// Reduces a token list to its kind signature and dispatches: exact static
/// signatures first, then prefix signatures in defined order.
fn classify(tokens: Vec<Token>, cursor: &Cursor) -> Result<Option<LineAction>, Diagnostic> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let signature: Vec<Kind> = tokens.iter().map(Token::kind).collect();

    let form = STATIC_FORMS
        .iter()
        .find(|(candidate, _)| *candidate == &signature[..])
        .or_else(|| {
            PREFIX_FORMS
                .iter()
                .find(|(candidate, _)| signature.starts_with(candidate))
        })
        .map(|(_, form)| *form);

    let form = match form {
        Some(form) => form,
        None => {
            return Err(Diagnostic::syntax(
                cursor.line,
                "the line does not match any statement form",
            ));
        }
    };

    let action = match form {
        Form::Assign => LineAction::Assign {
            name: ident_name(&tokens[0]),
            rhs: tokens[2..].to_vec(),
        },
        Form::Output => LineAction::Output {
            expr: tokens[1..].to_vec(),
        },
        Form::ReadNumber => LineAction::ReadNumber {
            name: ident_name(&tokens[1]),
        },
    };

    Ok(Some(action))
}

fn ident_name(token: &Token) -> String {
    match token {
        Token::Ident(name) => name.clone(),
        // the matched signature guarantees an identifier here
        _ => unreachable!(),
    }
}
