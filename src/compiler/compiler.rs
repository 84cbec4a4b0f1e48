use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::expr::Expr;
use crate::lexer::{Keyword, Token};
use crate::parser::{Line, LineAction, Parser};
use crate::symbol::{SymbolTable, Type};

use itertools::Itertools;

const CPP_HEADER: &str = "#include <iostream>\nusing namespace std;\n\nint main()\n{\n";
const CPP_FOOTER: &str = "\n\n    return 0;\n}\n";

/// The emitter backend: translates classified lines into C++ statements
/// inside a fixed program skeleton.
#[derive(Debug, Default)]
pub struct Compiler {
    table: SymbolTable,
    diagnostics: Diagnostics,
}

impl Compiler {
    pub fn new() -> Compiler {
        Compiler {
            table: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Translates `source` into one C++ translation unit, statements in
    /// source order. `None` if any diagnostic fired anywhere in the pass.
    pub fn compile(&mut self, source: &str) -> Option<String> {
        let parser = Parser::new();
        let lines = parser.parse(source, &mut self.diagnostics);

        let mut statements = vec![];
        for line in &lines {
            match self.emit_line(line) {
                Ok(emitted) => statements.extend(emitted),
                Err(diagnostic) => self.diagnostics.report(diagnostic),
            }
        }

        if !self.diagnostics.is_clean() {
            return None;
        }

        let body = statements
            .iter()
            .map(|statement| format!("    {}", statement))
            .join("\n");

        Some(format!("{}{}{}", CPP_HEADER, body, CPP_FOOTER))
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn emit_line(&mut self, line: &Line) -> Result<Vec<String>, Diagnostic> {
        match &line.action {
            LineAction::Assign { name, rhs } => self.emit_assign(name, rhs, line.number),
            LineAction::Output { expr } => self.emit_output(expr, line.number),
            LineAction::ReadNumber { name } => self.emit_read(name, line.number),
        }
    }

    /// First assignment declares (`<type> <name> = <rhs>;`), later ones
    /// reassign (`<name> = <rhs>;`) after the type consistency check.
    fn emit_assign(
        &mut self,
        name: &str,
        rhs: &[Token],
        number: usize,
    ) -> Result<Vec<String>, Diagnostic> {
        let expr = Expr::scan(rhs, &self.table, number)?;
        self.table.check_assignable(name, expr.ty, number)?;

        let is_new = self.table.declared_type(name).is_none();
        self.table.define(name, expr.ty, None);

        let statement = if is_new {
            format!("{} {} = {};", expr.ty, name, expr.render())
        } else {
            format!("{} = {};", name, expr.render())
        };

        Ok(vec![statement])
    }

    fn emit_output(&mut self, tokens: &[Token], number: usize) -> Result<Vec<String>, Diagnostic> {
        let expr = Expr::scan(tokens, &self.table, number)?;

        Ok(vec![format!("{} {};", Keyword::Out.cpp(), expr.render())])
    }

    /// A fresh name is declared with the numeric default before the read;
    /// an existing name must already be numeric.
    fn emit_read(&mut self, name: &str, number: usize) -> Result<Vec<String>, Diagnostic> {
        match self.table.declared_type(name) {
            None => {
                self.table.define(name, Type::Integer, None);
                Ok(vec![
                    format!("{} {};", Type::Integer, name),
                    format!("{} {};", Keyword::In.cpp(), name),
                ])
            }
            Some(ty) if !ty.is_numeric() => Err(Diagnostic::type_mismatch(
                number,
                format!("cannot read into `{}`: already declared as `{}`", name, ty),
            )),
            Some(_) => Ok(vec![format!("{} {};", Keyword::In.cpp(), name)]),
        }
    }
}
