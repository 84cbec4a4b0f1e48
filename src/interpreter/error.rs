use crate::diagnostics::Diagnostic;

use std::io;

pub type Result<T> = std::result::Result<T, ExecError>;

/// Failure of one executed line: a language diagnostic (aborts the line,
/// the run continues) or an I/O failure (fatal for the whole run).
#[derive(Debug)]
pub enum ExecError {
    Report(Diagnostic),
    Io(io::Error),
}

impl From<Diagnostic> for ExecError {
    fn from(diagnostic: Diagnostic) -> Self {
        ExecError::Report(diagnostic)
    }
}

impl From<io::Error> for ExecError {
    fn from(error: io::Error) -> Self {
        ExecError::Io(error)
    }
}
