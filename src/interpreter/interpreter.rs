use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::expr::Expr;
use crate::interpreter::error::{self, ExecError};
use crate::lexer::Token;
use crate::parser::{Line, LineAction, Parser};
use crate::symbol::{SymbolTable, Value};

use std::io::{self, BufRead, Write};

const PROMPT: &str = ">>> Enter a number: ";
const SUCCESS_LINE: &str = "[.] run succeeded";
const FAILURE_LINE: &str = "[!] run failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    Failure,
}

/// The evaluator backend: executes classified lines directly against the
/// symbol table. Input and output are injected so tests can drive the
/// interactive prompt.
pub struct Interpreter<R, W> {
    table: SymbolTable,
    diagnostics: Diagnostics,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Interpreter<R, W> {
        Interpreter {
            table: SymbolTable::new(),
            diagnostics: Diagnostics::new(),
            input,
            output,
        }
    }

    /// Two passes over `source`: validation (lex + classify every line,
    /// buffering the actions, no symbol table, no I/O), then execution of
    /// the buffer only if validation was clean. Execution diagnostics abort
    /// their line and the run continues.
    pub fn run(&mut self, source: &str) -> Result<RunStatus> {
        let parser = Parser::new();
        let lines = parser.parse(source, &mut self.diagnostics);

        for diagnostic in self.diagnostics.reports() {
            writeln!(self.output, "{}", diagnostic)?;
        }

        if self.diagnostics.is_clean() {
            for line in &lines {
                match self.exec_line(line) {
                    Ok(()) => {}
                    Err(ExecError::Report(diagnostic)) => {
                        writeln!(self.output, "{}", diagnostic)?;
                        self.diagnostics.report(diagnostic);
                    }
                    Err(ExecError::Io(error)) => return Err(error.into()),
                }
            }
        }

        let status = if self.diagnostics.is_clean() {
            writeln!(self.output, "{}", SUCCESS_LINE)?;
            RunStatus::Success
        } else {
            writeln!(self.output, "{}", FAILURE_LINE)?;
            RunStatus::Failure
        };

        Ok(status)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn exec_line(&mut self, line: &Line) -> error::Result<()> {
        match &line.action {
            LineAction::Assign { name, rhs } => self.exec_assign(name, rhs, line.number),
            LineAction::Output { expr } => self.exec_output(expr, line.number),
            LineAction::ReadNumber { name } => self.exec_read(name, line.number),
        }
    }

    fn exec_assign(&mut self, name: &str, rhs: &[Token], number: usize) -> error::Result<()> {
        let expr = Expr::scan(rhs, &self.table, number)?;
        self.table.check_assignable(name, expr.ty, number)?;

        let value = expr.eval(&self.table, number)?;
        self.table.define(name, expr.ty, Some(value));

        Ok(())
    }

    fn exec_output(&mut self, tokens: &[Token], number: usize) -> error::Result<()> {
        let expr = Expr::scan(tokens, &self.table, number)?;
        let value = expr.eval(&self.table, number)?;

        writeln!(self.output, "{}", value)?;

        Ok(())
    }

    /// Prompts until the input parses as a number. An existing name must be
    /// numeric before prompting, and must match the entered value's type
    /// afterwards; a mismatch aborts the action without re-prompting.
    fn exec_read(&mut self, name: &str, number: usize) -> error::Result<()> {
        if let Some(ty) = self.table.declared_type(name) {
            if !ty.is_numeric() {
                return Err(Diagnostic::type_mismatch(
                    number,
                    format!("cannot read into `{}`: already declared as `{}`", name, ty),
                )
                .into());
            }
        }

        let value = self.read_number()?;

        if let Some(ty) = self.table.declared_type(name) {
            if ty != value.ty() {
                return Err(Diagnostic::type_mismatch(
                    number,
                    format!(
                        "cannot assign `{}` as `{}`: already declared as `{}`",
                        name,
                        value.ty(),
                        ty
                    ),
                )
                .into());
            }
        }

        self.table.define(name, value.ty(), Some(value));

        Ok(())
    }

    fn read_number(&mut self) -> error::Result<Value> {
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let mut buffer = String::new();
            let read = self.input.read_line(&mut buffer)?;
            if read == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed while waiting for a number",
                )
                .into());
            }

            match buffer.trim().parse::<f64>() {
                Ok(value) => return Ok(Value::from_number(value)),
                Err(_) => writeln!(self.output, "[!] enter a valid number")?,
            }
        }
    }
}

/// Convenience entry for callers driving the process streams.
pub fn run(source: &str) -> Result<RunStatus> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut interpreter = Interpreter::new(stdin.lock(), stdout.lock());
    interpreter.run(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::diagnostics::DiagnosticKind;

    use std::io::Cursor;

    use test_case::test_case;

    fn run_with_input(source: &str, input: &str) -> (RunStatus, String) {
        let mut output = vec![];
        let status = {
            let mut interpreter = Interpreter::new(Cursor::new(input.to_string()), &mut output);
            interpreter.run(source).unwrap()
        };
        (status, String::from_utf8(output).unwrap())
    }

    fn run_source(source: &str) -> (RunStatus, String) {
        run_with_input(source, "")
    }

    #[test_case("a = 5\nout a", "5" ; "assign then output")]
    #[test_case("out 1 + 2 - 4", "-1" ; "left to right chain")]
    #[test_case("x = 2.5\nout x + 0.25", "2.75" ; "float arithmetic")]
    #[test_case("out \"hi\"", "hi" ; "string prints bare")]
    #[test_case("s = \"hi\"\nout s", "hi" ; "string variable prints bare")]
    #[test_case("a = 2\na = a + 3\nout a", "5" ; "reassignment reuses the value")]
    fn printed_value(source: &str, expected: &str) {
        let (status, output) = run_source(source);

        assert_eq!(status, RunStatus::Success);
        assert_eq!(output, format!("{}\n{}\n", expected, SUCCESS_LINE))
    }

    #[test]
    fn read_then_arithmetic() {
        let (status, output) = run_with_input("in a\nout a + 2", "3\n");

        assert_eq!(status, RunStatus::Success);
        assert_eq!(
            output,
            format!("{}5\n{}\n", PROMPT, SUCCESS_LINE)
        )
    }

    #[test]
    fn invalid_input_reprompts() {
        let (status, output) = run_with_input("in a\nout a", "abc\n\n7\n");

        assert_eq!(status, RunStatus::Success);
        assert_eq!(output.matches(PROMPT).count(), 3);
        assert_eq!(output.matches("[!] enter a valid number").count(), 2);
        assert!(output.ends_with(&format!("7\n{}\n", SUCCESS_LINE)))
    }

    #[test]
    fn fractional_input_reads_as_float() {
        let (status, output) = run_with_input("in x\nout x + 0.5", "2.5\n");

        assert_eq!(status, RunStatus::Success);
        assert!(output.contains("3\n"))
    }

    #[test]
    fn read_type_mismatch_aborts_without_reprompt() {
        let (status, output) = run_with_input("a = 1\nin a\nout a", "2.5\n");

        assert_eq!(status, RunStatus::Failure);
        assert_eq!(output.matches(PROMPT).count(), 1);
        assert!(output.contains("cannot assign `a` as `float`: already declared as `int`"));
        // the failed read leaves the value untouched
        assert!(output.contains("1\n"))
    }

    #[test]
    fn conflicting_assignment_keeps_value_and_type() {
        let (status, output) = run_source("a = 5\na = \"x\"\nout a");

        assert_eq!(status, RunStatus::Failure);
        assert!(output.contains("cannot assign `a` as `string`: already declared as `int`"));
        assert!(output.contains("5\n"));
        assert!(output.ends_with(&format!("{}\n", FAILURE_LINE)))
    }

    #[test]
    fn integer_then_float_assignment_fails() {
        let (status, output) = run_source("b = 1\nb = 2.5");

        assert_eq!(status, RunStatus::Failure);
        assert!(output.contains("cannot assign `b` as `float`: already declared as `int`"))
    }

    #[test]
    fn validation_diagnostics_suppress_execution() {
        let (status, output) = run_source("@#\nout 1");

        assert_eq!(status, RunStatus::Failure);
        assert!(output.contains("`@#` is not a valid word"));
        // execution never runs, so nothing is printed for `out 1`
        assert!(!output.contains("1\n"))
    }

    #[test]
    fn execution_continues_past_a_failed_line() {
        let (status, output) = run_source("out a\nout 2");

        assert_eq!(status, RunStatus::Failure);
        assert!(output.contains("variable `a` is not defined"));
        assert!(output.contains("2\n"))
    }

    #[test]
    fn integer_overflow_aborts_the_line_not_the_run() {
        let (status, output) = run_source("a = 9223372036854775807\nout a + 1\nout 2");

        assert_eq!(status, RunStatus::Failure);
        assert!(output.contains("overflows an integer"));
        assert!(output.contains("2\n"))
    }

    #[test]
    fn read_into_string_variable_fails_before_prompting() {
        let (status, output) = run_source("s = \"x\"\nin s");

        assert_eq!(status, RunStatus::Failure);
        assert!(!output.contains(PROMPT));
        assert!(output.contains("cannot read into `s`: already declared as `string`"))
    }

    #[test]
    fn execution_diagnostics_are_recorded() {
        let mut output = vec![];
        let mut interpreter = Interpreter::new(Cursor::new(String::new()), &mut output);

        interpreter.run("out a").unwrap();

        assert_eq!(interpreter.diagnostics().reports().len(), 1);
        assert_eq!(
            interpreter.diagnostics().reports()[0].kind,
            DiagnosticKind::Name
        )
    }

    #[test]
    fn comment_only_program_succeeds() {
        let (status, output) = run_source("// nothing to do");

        assert_eq!(status, RunStatus::Success);
        assert_eq!(output, format!("{}\n", SUCCESS_LINE))
    }
}
