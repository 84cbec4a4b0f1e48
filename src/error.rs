use std::error::Error;
use std::{fmt, io};

pub type Result<T> = std::result::Result<T, XError>;

#[derive(Debug, PartialEq, Eq)]
pub struct XError(pub String);

impl fmt::Display for XError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for XError {}

impl From<io::Error> for XError {
    fn from(error: io::Error) -> Self {
        XError(error.to_string())
    }
}
