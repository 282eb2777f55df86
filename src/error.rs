//! Error results that can occur working with the package fixtures
#![warn(missing_docs)]
#![warn(unsafe_code)]

use core::fmt::{Debug, Display, Formatter, Result};
use ufmt::{uDebug, uWrite};

/// The kinds of errors that can occur working with the fixtures
#[derive(Eq, PartialEq)]
pub enum ErrorKind {
    /// The arena does not have enough capacity left for an allocation
    ArenaExhausted,
    /// A stack overflow would occur if an item is pushed
    StackOverflow,
    /// A stack underflow would occur if an item is popped
    StackUnderflow,
    /// The format buffer is too small for the rendered output
    BufferOverflow,
    /// The serial peripheral reported a failure
    Serial,
    /// A null pointer was passed in as a parameter or
    /// would have been dereferenced
    NullPointer,
    /// Invalid arguments were passed into a function.
    /// Examples include a zero-length arena or an alignment that is
    /// not a power of two.
    InvalidArguments,
}

impl uDebug for ErrorKind {
    fn fmt<T>(&self, f: &mut ufmt::Formatter<'_, T>) -> core::result::Result<(), T::Error>
    where
        T: uWrite + ?Sized,
    {
        match self {
            ErrorKind::ArenaExhausted => f.write_str("The arena is exhausted"),
            ErrorKind::StackOverflow => f.write_str("A stack overflow occurred"),
            ErrorKind::StackUnderflow => f.write_str("A stack underflow occurred"),
            ErrorKind::BufferOverflow => f.write_str("The format buffer overflowed"),
            ErrorKind::Serial => f.write_str("The serial peripheral reported a failure"),
            ErrorKind::NullPointer => f.write_str("A null pointer was passed in as a parameter"),
            ErrorKind::InvalidArguments => f.write_str("Invalid arguments were passed in"),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ErrorKind::ArenaExhausted => write!(f, "The arena is exhausted"),
            ErrorKind::StackOverflow => write!(f, "A stack overflow occurred"),
            ErrorKind::StackUnderflow => write!(f, "A stack underflow occurred"),
            ErrorKind::BufferOverflow => write!(f, "The format buffer overflowed"),
            ErrorKind::Serial => write!(f, "The serial peripheral reported a failure"),
            ErrorKind::NullPointer => write!(f, "A null pointer was passed in as a parameter"),
            ErrorKind::InvalidArguments => write!(f, "Invalid arguments were passed in"),
        }
    }
}

/// An error that can occur when working with the package fixtures
#[derive(PartialEq)]
pub struct Error {
    kind: ErrorKind,
}

impl Error {
    /// Create a new Error with a given ErrorKind variant
    pub fn new(kind: ErrorKind) -> Error {
        Error { kind }
    }

    /// The kind of error that occurred
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.kind)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}", self.kind)
    }
}
