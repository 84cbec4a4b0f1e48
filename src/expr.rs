use crate::diagnostics::Diagnostic;
use crate::lexer::{Operator, Token};
use crate::symbol::{SymbolTable, Type, Value};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(Type, String),
    Variable(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(_, text) => write!(f, "{}", text),
            Operand::Variable(name) => write!(f, "{}", name),
        }
    }
}

/// A scanned right-hand side: operands chained left-to-right by `+`/`-`,
/// all of one common type. Renders to C++ text for the emitter and
/// evaluates to a concrete value for the interpreter.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub ty: Type,
    first: Operand,
    rest: Vec<(ArithOp, Operand)>,
}

impl Expr {
    /// Walks the tokens after a line's fixed prefix, alternating
    /// operand/operator roles starting in operand role. The first operand
    /// establishes the common type.
    pub fn scan(tokens: &[Token], table: &SymbolTable, line: usize) -> Result<Expr, Diagnostic> {
        let mut iter = tokens.iter();

        let token = iter
            .next()
            .ok_or_else(|| Diagnostic::syntax(line, "expected an expression"))?;
        let (first, ty) = scan_operand(token, table, line)?;

        let mut rest = vec![];
        while let Some(token) = iter.next() {
            let op = match token {
                Token::Operator(Operator::Plus) => ArithOp::Add,
                Token::Operator(Operator::Minus) => ArithOp::Sub,
                other => {
                    return Err(Diagnostic::syntax(
                        line,
                        format!("expected `+` or `-`, got `{}`", other),
                    ));
                }
            };

            if ty == Type::String {
                return Err(Diagnostic::type_mismatch(
                    line,
                    "operators are not supported between `string` operands",
                ));
            }

            let token = iter.next().ok_or_else(|| {
                Diagnostic::syntax(line, format!("expression ends with `{}`", op))
            })?;
            let (operand, operand_ty) = scan_operand(token, table, line)?;
            if operand_ty != ty {
                return Err(Diagnostic::type_mismatch(
                    line,
                    format!("cannot use operators between `{}` and `{}`", operand_ty, ty),
                ));
            }

            rest.push((op, operand));
        }

        Ok(Expr { ty, first, rest })
    }

    /// Evaluates left-to-right; only `+`/`-`, no precedence. A lone string
    /// operand yields its content.
    pub fn eval(&self, table: &SymbolTable, line: usize) -> Result<Value, Diagnostic> {
        let mut acc = operand_value(&self.first, table, line)?;

        for (op, operand) in &self.rest {
            let rhs = operand_value(operand, table, line)?;

            acc = match (acc, op, rhs) {
                (Value::Integer(n), ArithOp::Add, Value::Integer(m)) => {
                    Value::Integer(n.checked_add(m).ok_or_else(|| overflow(n, *op, m, line))?)
                }
                (Value::Integer(n), ArithOp::Sub, Value::Integer(m)) => {
                    Value::Integer(n.checked_sub(m).ok_or_else(|| overflow(n, *op, m, line))?)
                }
                (Value::Float(x), ArithOp::Add, Value::Float(y)) => Value::Float(x + y),
                (Value::Float(x), ArithOp::Sub, Value::Float(y)) => Value::Float(x - y),
                (lhs, op, rhs) => {
                    return Err(Diagnostic::type_mismatch(
                        line,
                        format!("cannot evaluate `{} {} {}`", lhs, op, rhs),
                    ));
                }
            };
        }

        Ok(acc)
    }

    /// C++ rendering of the chain, operands as written in the source.
    pub fn render(&self) -> String {
        let mut text = self.first.to_string();

        for (op, operand) in &self.rest {
            text.push_str(&format!(" {} {}", op, operand));
        }

        text
    }
}

fn overflow(n: i64, op: ArithOp, m: i64, line: usize) -> Diagnostic {
    Diagnostic::type_mismatch(line, format!("`{} {} {}` overflows an integer", n, op, m))
}

fn scan_operand(
    token: &Token,
    table: &SymbolTable,
    line: usize,
) -> Result<(Operand, Type), Diagnostic> {
    let ty = table.resolve_operand_type(token, line)?;

    let operand = match token {
        Token::Literal { ty, text } => Operand::Literal(*ty, text.clone()),
        Token::Ident(name) => Operand::Variable(name.clone()),
        // resolve_operand_type rejected everything else
        _ => unreachable!(),
    };

    Ok((operand, ty))
}

fn operand_value(operand: &Operand, table: &SymbolTable, line: usize) -> Result<Value, Diagnostic> {
    match operand {
        Operand::Literal(ty, text) => Value::from_literal(*ty, text, line),
        Operand::Variable(name) => table
            .get(name)
            .and_then(|symbol| symbol.value.clone())
            .ok_or_else(|| Diagnostic::undeclared(line, name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::diagnostics::{Cursor, DiagnosticKind};
    use crate::lexer::Lexer;

    use test_case::test_case;

    fn tokens(text: &str) -> Vec<Token> {
        let mut cursor = Cursor::new();
        cursor.line = 1;
        Lexer::new().lex_line(text, &mut cursor).unwrap()
    }

    fn table() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.define("a", Type::Integer, Some(Value::Integer(3)));
        table.define("x", Type::Float, Some(Value::Float(0.5)));
        table.define("s", Type::String, Some(Value::Str("hi".to_string())));
        table
    }

    #[test_case("5", Type::Integer, Value::Integer(5) ; "single integer")]
    #[test_case("5 + 2 - 3", Type::Integer, Value::Integer(4) ; "integer chain")]
    #[test_case("a + 2", Type::Integer, Value::Integer(5) ; "declared variable")]
    #[test_case("2.5 + x", Type::Float, Value::Float(3.0) ; "float chain")]
    #[test_case("\"hi\"", Type::String, Value::Str("hi".to_string()) ; "single string")]
    #[test_case("s", Type::String, Value::Str("hi".to_string()) ; "string variable")]
    #[test_case("10 - 2 - 3", Type::Integer, Value::Integer(5) ; "left to right")]
    fn scan_and_eval(text: &str, ty: Type, value: Value) {
        let table = table();

        let expr = Expr::scan(&tokens(text), &table, 1).unwrap();

        assert_eq!(expr.ty, ty);
        assert_eq!(expr.eval(&table, 1), Ok(value))
    }

    #[test_case("5 + 2", "5 + 2" ; "literal chain")]
    #[test_case("a+2", "a + 2" ; "unspaced source is normalized")]
    #[test_case("\"hi\"", "\"hi\"" ; "string keeps quotes")]
    fn render(text: &str, expected: &str) {
        let expr = Expr::scan(&tokens(text), &table(), 1).unwrap();

        assert_eq!(expr.render(), expected)
    }

    #[test_case("9223372036854775807 + 1", ArithOp::Add ; "addition overflow")]
    #[test_case("0 - 9223372036854775807 - 2", ArithOp::Sub ; "subtraction overflow")]
    fn integer_overflow_is_a_diagnostic(text: &str, op: ArithOp) {
        let table = table();

        let expr = Expr::scan(&tokens(text), &table, 2).unwrap();
        let err = expr.eval(&table, 2).unwrap_err();

        assert_eq!(err.kind, DiagnosticKind::Type);
        assert_eq!(err.line, 2);
        assert!(err.message.contains(&format!("{}", op)));
        assert!(err.message.contains("overflows an integer"))
    }

    #[test_case("1 + 2.5", DiagnosticKind::Type ; "mixed numeric types")]
    #[test_case("1 + \"x\"", DiagnosticKind::Type ; "integer plus string")]
    #[test_case("\"a\" + \"b\"", DiagnosticKind::Type ; "no string concatenation")]
    #[test_case("a + x", DiagnosticKind::Type ; "mixed variable types")]
    #[test_case("", DiagnosticKind::Syntax ; "empty expression")]
    #[test_case("1 +", DiagnosticKind::Syntax ; "trailing operator")]
    #[test_case("1 2", DiagnosticKind::Syntax ; "operand in operator role")]
    #[test_case("1 = 2", DiagnosticKind::Syntax ; "assignment inside expression")]
    #[test_case("+ 1", DiagnosticKind::Syntax ; "operator in operand role")]
    #[test_case("b + 1", DiagnosticKind::Name ; "undeclared variable")]
    fn scan_errors(text: &str, kind: DiagnosticKind) {
        let err = Expr::scan(&tokens(text), &table(), 1).unwrap_err();

        assert_eq!(err.kind, kind)
    }
}
