use crate::diagnostics::Diagnostic;
use crate::lexer::Token;

use std::collections::HashMap;
use std::fmt;

/// The three value types of X. A name's type is fixed by its first
/// successful assignment or read and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Integer,
    Float,
    String,
}

impl Type {
    pub fn is_numeric(&self) -> bool {
        match self {
            Type::Integer | Type::Float => true,
            Type::String => false,
        }
    }
}

impl fmt::Display for Type {
    // doubles as the C++ rendering of the type
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Integer => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Integer(_) => Type::Integer,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::String,
        }
    }

    /// Concrete value of a literal token's text. String literals drop their
    /// surrounding quotes.
    pub fn from_literal(ty: Type, text: &str, line: usize) -> Result<Value, Diagnostic> {
        match ty {
            Type::Integer => text
                .parse()
                .map(Value::Integer)
                .map_err(|_| Diagnostic::syntax(line, format!("`{}` does not fit in an integer", text))),
            Type::Float => text
                .parse()
                .map(Value::Float)
                .map_err(|_| Diagnostic::syntax(line, format!("`{}` is not a valid float", text))),
            Type::String => Ok(Value::Str(text[1..text.len() - 1].to_string())),
        }
    }

    /// Classifies an entered number: Integer when exactly representable as
    /// i64, Float otherwise. The upper bound is exclusive because
    /// `i64::MAX as f64` rounds up to 2^63, one past the largest i64.
    pub fn from_number(number: f64) -> Value {
        if number.fract() == 0.0 && number >= i64::MIN as f64 && number < i64::MAX as f64 {
            Value::Integer(number as i64)
        } else {
            Value::Float(number)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
        }
    }
}

/// A declared name's state; the table's key carries the name itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub ty: Option<Type>,
    pub value: Option<Value>,
}

/// Name -> (type, value) map for one compile/run invocation.
#[derive(Debug, Default)]
pub struct SymbolTable {
    store: HashMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.store.get(name)
    }

    pub fn declared_type(&self, name: &str) -> Option<Type> {
        self.store.get(name).and_then(|symbol| symbol.ty)
    }

    pub fn declare_or_find(&mut self, name: &str) -> &mut Symbol {
        self.store.entry(name.to_string()).or_insert(Symbol {
            ty: None,
            value: None,
        })
    }

    /// Errors unless `incoming` matches the name's established type; a name
    /// without an established type accepts any incoming type.
    pub fn check_assignable(
        &self,
        name: &str,
        incoming: Type,
        line: usize,
    ) -> Result<(), Diagnostic> {
        match self.declared_type(name) {
            Some(existing) if existing != incoming => Err(Diagnostic::type_mismatch(
                line,
                format!(
                    "cannot assign `{}` as `{}`: already declared as `{}`",
                    name, incoming, existing
                ),
            )),
            _ => Ok(()),
        }
    }

    /// Records a successful assignment. Callers check type consistency via
    /// `check_assignable` first.
    pub fn define(&mut self, name: &str, ty: Type, value: Option<Value>) {
        let symbol = self.declare_or_find(name);
        symbol.ty = Some(ty);
        if value.is_some() {
            symbol.value = value;
        }
    }

    /// Type of a token in operand position: a literal's own subtype or a
    /// declared identifier's type.
    pub fn resolve_operand_type(&self, token: &Token, line: usize) -> Result<Type, Diagnostic> {
        match token {
            Token::Literal { ty, .. } => Ok(*ty),
            Token::Ident(name) => self
                .declared_type(name)
                .ok_or_else(|| Diagnostic::undeclared(line, name)),
            other => Err(Diagnostic::syntax(
                line,
                format!("`{}` cannot be used as an operand", other),
            )),
        }
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::diagnostics::DiagnosticKind;

    use test_case::test_case;

    #[test]
    fn declare_or_find_starts_untyped() {
        let mut table = SymbolTable::new();

        let symbol = table.declare_or_find("a");

        assert_eq!(symbol.ty, None);
        assert_eq!(symbol.value, None)
    }

    #[test]
    fn define_fixes_type() {
        let mut table = SymbolTable::new();

        table.define("a", Type::Integer, Some(Value::Integer(5)));

        assert_eq!(table.declared_type("a"), Some(Type::Integer));
        assert!(table.check_assignable("a", Type::Integer, 2).is_ok());

        let err = table.check_assignable("a", Type::String, 2).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Type);
        assert_eq!(
            err.message,
            "cannot assign `a` as `string`: already declared as `int`"
        )
    }

    #[test]
    fn fresh_name_accepts_any_type() {
        let table = SymbolTable::new();

        assert!(table.check_assignable("a", Type::Float, 1).is_ok())
    }

    #[test]
    fn resolve_operand_types() {
        let mut table = SymbolTable::new();
        table.define("a", Type::Float, Some(Value::Float(1.5)));

        let literal = Token::Literal {
            ty: Type::Integer,
            text: "5".to_string(),
        };
        assert_eq!(table.resolve_operand_type(&literal, 1), Ok(Type::Integer));

        let declared = Token::Ident("a".to_string());
        assert_eq!(table.resolve_operand_type(&declared, 1), Ok(Type::Float));

        let undeclared = Token::Ident("b".to_string());
        let err = table.resolve_operand_type(&undeclared, 3).unwrap_err();
        assert_eq!(err.kind, DiagnosticKind::Name);
        assert_eq!(err.line, 3)
    }

    #[test_case(5.0, Value::Integer(5) ; "whole number is integer")]
    #[test_case(-3.0, Value::Integer(-3) ; "negative whole number")]
    #[test_case(2.5, Value::Float(2.5) ; "fractional number is float")]
    #[test_case(9223372036854775808.0, Value::Float(9223372036854775808.0) ; "two to the sixty-third is float")]
    #[test_case(-9223372036854775808.0, Value::Integer(i64::MIN) ; "smallest integer stays integer")]
    fn number_classification(number: f64, expected: Value) {
        assert_eq!(Value::from_number(number), expected)
    }

    #[test_case(Type::Integer, "5", Value::Integer(5) ; "integer literal")]
    #[test_case(Type::Integer, "+5", Value::Integer(5) ; "signed integer literal")]
    #[test_case(Type::Float, "2.5", Value::Float(2.5) ; "float literal")]
    #[test_case(Type::String, "\"hi\"", Value::Str("hi".to_string()) ; "string literal drops quotes")]
    fn literal_values(ty: Type, text: &str, expected: Value) {
        assert_eq!(Value::from_literal(ty, text, 1), Ok(expected))
    }
}
