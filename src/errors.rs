//! Errors and error-related utilities.

use std::{error, fmt, result};

/// The result type used throughout this library.
pub type Result<T> = result::Result<T, Box<dyn error::Error>>;

/// Invalid input data.
#[derive(Debug)]
pub struct InvalidInput(pub String);

/// Invalid command line argument.
#[derive(Debug)]
pub struct InvalidArgument(pub String);

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid input: {}", self.0)
    }
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid argument: {}", self.0)
    }
}

impl error::Error for InvalidInput {}

impl error::Error for InvalidArgument {}

/// A helper for constructing [InvalidInput].
pub fn invalid_input(s: String) -> Box<dyn error::Error> {
    InvalidInput(s).into()
}

/// A helper for constructing [InvalidInput].
pub fn invalid_input_ref(s: &str) -> Box<dyn error::Error> {
    InvalidInput(s.to_owned()).into()
}

/// A helper for constructing [InvalidArgument].
pub fn invalid_argument(s: String) -> Box<dyn error::Error> {
    InvalidArgument(s).into()
}

/// Why a single sub-question could not be answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// The question does not carry what the handler needs, e.g. two states to compare.
    Precondition,
    /// Nothing left to aggregate after filtering.
    EmptyResult,
    /// A percentage was requested relative to zero.
    DivisionByZero,
    /// Writing the report failed.
    Format,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl QueryFailure {
    pub fn new(kind: FailureKind, message: &str) -> QueryFailure {
        QueryFailure {
            kind,
            message: message.to_owned(),
        }
    }

    pub fn precondition(message: &str) -> QueryFailure {
        QueryFailure::new(FailureKind::Precondition, message)
    }

    pub fn empty(message: &str) -> QueryFailure {
        QueryFailure::new(FailureKind::EmptyResult, message)
    }

    pub fn division_by_zero(message: &str) -> QueryFailure {
        QueryFailure::new(FailureKind::DivisionByZero, message)
    }
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            FailureKind::Precondition => write!(f, "❌ {}", self.message),
            _ => write!(f, "❌ Error: {}", self.message),
        }
    }
}

impl error::Error for QueryFailure {}

impl From<fmt::Error> for QueryFailure {
    fn from(e: fmt::Error) -> QueryFailure {
        QueryFailure {
            kind: FailureKind::Format,
            message: e.to_string(),
        }
    }
}

pub type Report = result::Result<String, QueryFailure>;
