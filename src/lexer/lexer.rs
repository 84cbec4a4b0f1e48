use crate::diagnostics::{Cursor, Diagnostic};
use crate::lexer::token::{Keyword, Operator, Token};
use crate::symbol::Type;

use std::collections::HashMap;

use regex::Regex;

const COMMENT_WORD: &str = "//";

/// Word-level lexer. The lexicon (reserved words, operators, literal and
/// identifier regexes) is built once per invocation and read-only afterwards.
#[derive(Debug)]
pub struct Lexer {
    reserved: HashMap<&'static str, Keyword>,
    operators: HashMap<char, Operator>,
    ident: Regex,
    string: Regex,
    integer: Regex,
    float: Regex,
}

impl Lexer {
    pub fn new() -> Lexer {
        let mut reserved = HashMap::new();
        reserved.insert("in", Keyword::In);
        reserved.insert("out", Keyword::Out);

        let mut operators = HashMap::new();
        operators.insert('=', Operator::Assign);
        operators.insert('+', Operator::Plus);
        operators.insert('-', Operator::Minus);

        Lexer {
            reserved,
            operators,
            ident: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap(),
            string: Regex::new(r#"^".*"$"#).unwrap(),
            integer: Regex::new(r"^[+-]?[0-9]+$").unwrap(),
            float: Regex::new(r"^[+-]?[0-9]*\.[0-9]+$").unwrap(),
        }
    }

    /// Splits a line into words on whitespace and on operator characters;
    /// operators separate even unspaced and come out as their own words.
    fn split_words(&self, line: &str) -> Vec<String> {
        let mut words = vec![];
        let mut current = String::new();

        for ch in line.chars() {
            if ch.is_whitespace() || self.operators.contains_key(&ch) {
                if !current.is_empty() {
                    words.push(current.clone());
                    current.clear();
                }
                if !ch.is_whitespace() {
                    words.push(ch.to_string());
                }
            } else {
                current.push(ch);
            }
        }
        if !current.is_empty() {
            words.push(current);
        }

        words
    }

    /// Classifies one word in strict precedence: comment marker, reserved
    /// word, operator, identifier, string, integer, float.
    fn lex_word(&self, word: &str) -> Option<Token> {
        if word == COMMENT_WORD {
            return Some(Token::Comment);
        }
        if let Some(&keyword) = self.reserved.get(word) {
            return Some(Token::Reserved(keyword));
        }

        let mut chars = word.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(&operator) = self.operators.get(&ch) {
                return Some(Token::Operator(operator));
            }
        }

        if self.ident.is_match(word) {
            return Some(Token::Ident(word.to_string()));
        }

        let ty = if self.string.is_match(word) {
            Type::String
        } else if self.integer.is_match(word) {
            Type::Integer
        } else if self.float.is_match(word) {
            Type::Float
        } else {
            return None;
        };

        Some(Token::Literal {
            ty,
            text: word.to_string(),
        })
    }

    /// Lexes one trimmed, non-empty line. A comment marker ends the line's
    /// tokens; everything after it is ignored unexamined. The first word
    /// matching no rule aborts the line with a SyntaxError naming it.
    pub fn lex_line(&self, line: &str, cursor: &mut Cursor) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = vec![];

        for word in self.split_words(line) {
            cursor.word = word.clone();

            let token = match self.lex_word(&word) {
                Some(token) => token,
                None => return Err(Diagnostic::invalid_word(cursor)),
            };

            if let Token::Comment = token {
                break;
            }
            tokens.push(token);
        }

        Ok(tokens)
    }
}

impl Default for Lexer {
    fn default() -> Lexer {
        Lexer::new()
    }
}
