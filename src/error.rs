//! Error type returned by [`Pipe`](crate::Pipe) operations.

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

/// Error type returned by the operations of [`Pipe`](crate::Pipe).
///
/// Nothing is retried or interpreted on the way out: system errors carry the OS error exactly as
/// it was reported, `EINTR` included.
#[derive(Debug)]
pub enum PipeError {
    /// The operation requires an open pipe, but the pipe was never opened or has already been
    /// closed.
    NotOpen,
    /// The underlying system call failed.
    System(io::Error),
}
impl PipeError {
    /// Returns the OS error code of a [system error](Self::System), if there is one.
    #[inline]
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            Self::NotOpen => None,
            Self::System(e) => e.raw_os_error(),
        }
    }
    /// Whether this is the [`NotOpen`](Self::NotOpen) variant.
    #[inline]
    pub fn is_not_open(&self) -> bool {
        matches!(self, Self::NotOpen)
    }
}
impl Display for PipeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotOpen => f.write_str("pipe not opened"),
            Self::System(e) => Display::fmt(e, f),
        }
    }
}
impl Error for PipeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotOpen => None,
            Self::System(e) => Some(e),
        }
    }
}

impl From<io::Error> for PipeError {
    #[inline]
    fn from(e: io::Error) -> Self {
        Self::System(e)
    }
}
/// `NotOpen` becomes an error of kind [`NotConnected`](io::ErrorKind::NotConnected); system
/// errors are passed through unchanged.
impl From<PipeError> for io::Error {
    fn from(e: PipeError) -> Self {
        match e {
            PipeError::NotOpen => io::Error::new(io::ErrorKind::NotConnected, e),
            PipeError::System(e) => e,
        }
    }
}

/// Result type returned by the operations of [`Pipe`](crate::Pipe).
pub type PipeResult<T = ()> = Result<T, PipeError>;
