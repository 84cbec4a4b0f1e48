use std::fmt;

use itertools::Itertools;

/// Position of the front end inside the source: 1-based line number plus the
/// word currently under examination. Owned by one compile/run invocation and
/// consulted only when a diagnostic is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub word: String,
}

impl Cursor {
    pub fn new() -> Cursor {
        Cursor {
            line: 0,
            word: String::new(),
        }
    }
}

impl Default for Cursor {
    fn default() -> Cursor {
        Cursor::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Syntax,
    Type,
    Name,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Syntax => write!(f, "SyntaxError"),
            DiagnosticKind::Type => write!(f, "TypeError"),
            DiagnosticKind::Name => write!(f, "NameError"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    pub word: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn invalid_word(cursor: &Cursor) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::Syntax,
            line: cursor.line,
            word: Some(cursor.word.clone()),
            message: format!("`{}` is not a valid word", cursor.word),
        }
    }

    pub fn syntax<S>(line: usize, message: S) -> Diagnostic
    where
        S: Into<String>,
    {
        Diagnostic {
            kind: DiagnosticKind::Syntax,
            line,
            word: None,
            message: message.into(),
        }
    }

    pub fn type_mismatch<S>(line: usize, message: S) -> Diagnostic
    where
        S: Into<String>,
    {
        Diagnostic {
            kind: DiagnosticKind::Type,
            line,
            word: None,
            message: message.into(),
        }
    }

    pub fn undeclared(line: usize, name: &str) -> Diagnostic {
        Diagnostic {
            kind: DiagnosticKind::Name,
            line,
            word: None,
            message: format!("variable `{}` is not defined", name),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in line {}", self.kind, self.line)?;
        if let Some(word) = &self.word {
            write!(f, ", word `{}`", word)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Non-fatal reports accumulated over one pass. Scanning continues after a
/// report; the caller checks `is_clean` before producing any final output.
#[derive(Debug, Default)]
pub struct Diagnostics {
    reports: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics { reports: vec![] }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.reports.push(diagnostic);
    }

    pub fn is_clean(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn reports(&self) -> &[Diagnostic] {
        &self.reports
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reports.iter().join("\n"))
    }
}
