mod error;
mod interpreter;

pub use error::ExecError;
pub use interpreter::{run, Interpreter, RunStatus};
