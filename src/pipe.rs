//! Creation and usage of anonymous pipes with an explicit open/closed lifecycle.
//!
//! A [`Pipe`] starts out closed. [`open()`](Pipe::open) creates a kernel pipe with a single
//! `pipe()` system call and stores both of its descriptors; [`close()`](Pipe::close) releases them
//! again. In between, the raw descriptors can be handed to other code, most commonly a
//! process-spawning routine that wires them into a child's standard streams, or a polling loop.
//!
//! Reads and writes go straight to the `read()` and `write()` system calls with no buffering in
//! between, so partial writes and end-of-stream are reported exactly as the kernel reports them.
//!
//! # Example
//! ```
#![doc = doctest_file::include_doctest!("demos/unnamed_pipe/main.rs")]
//! ```

mod options;
pub use options::*;

use crate::{
    error::{PipeError, PipeResult},
    os::unix::FdOps,
};
use log::{error, trace, warn};
use std::{
    fmt::{self, Debug, Formatter},
    io::{self, Read, Write},
    os::unix::io::RawFd,
};

/// The value returned by [`Pipe::read_fd()`] and [`Pipe::write_fd()`] while the pipe is not open.
pub const INVALID_FD: RawFd = -1;

/// Both ends of a pipe. They only ever exist together.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Ends {
    pub(crate) read: FdOps,
    pub(crate) write: FdOps,
}
impl Ends {
    /// Closes both ends unconditionally, reporting the error of the reading end if both fail.
    pub(crate) fn close(self) -> io::Result<()> {
        let rd = self.read.close();
        let wr = self.write.close();
        rd.and(wr)
    }
}

/// A handle to an anonymous pipe, owning both of its file descriptors between
/// [`open()`](Self::open) and [`close()`](Self::close).
///
/// # Lifecycle
/// A freshly constructed pipe is closed, and so is a pipe that has been [closed](Self::close),
/// whether or not closing the descriptors succeeded. Reading, writing and closing a closed pipe
/// fail with [`PipeError::NotOpen`]. A closed pipe can be opened again, which creates a brand new
/// kernel pipe.
///
/// Dropping a pipe that is still open closes both descriptors. Errors from that path cannot be
/// returned and are only logged, so call [`close()`](Self::close) if they matter.
///
/// # Concurrency
/// Opening and closing take `&mut self`, which rules out closing a pipe while a read or write is in
/// flight on another thread. Reads and writes take `&self`: one thread can read from a shared
/// `&Pipe` while another one writes to it, since the two descriptors are independent.
///
/// # `std::io` traits
/// [`Read`] and [`Write`] are implemented for both `Pipe` and `&Pipe`. Through them,
/// [`PipeError::NotOpen`] turns into an error of kind [`NotConnected`](io::ErrorKind::NotConnected).
#[derive(Default)]
pub struct Pipe {
    ends: Option<Ends>,
}

/// Creation.
impl Pipe {
    /// Creates a pipe handle in the closed state. No system calls are made.
    #[inline]
    pub const fn new() -> Self {
        Self { ends: None }
    }
    /// Adopts an existing pair of descriptors as an open pipe.
    ///
    /// # Safety
    /// Both descriptors must be valid and must not be owned by anything else, since the pipe will
    /// close them.
    #[inline]
    pub unsafe fn from_raw_fds(read: RawFd, write: RawFd) -> Self {
        Self {
            ends: Some(Ends {
                read: FdOps(read),
                write: FdOps(write),
            }),
        }
    }
}

/// Lifecycle.
impl Pipe {
    /// Creates a new kernel pipe with default [options](PipeOptions) and stores both of its
    /// descriptors.
    ///
    /// # Double open
    /// Opening a pipe that is already open does **not** close the descriptors it held before: they
    /// are replaced by the new pair and leaked. Close the pipe first, or use a new `Pipe`.
    ///
    /// # Errors
    /// [`PipeError::System`] if `pipe()` fails, for example when the descriptor table is full.
    #[inline]
    pub fn open(&mut self) -> PipeResult<()> {
        self.open_with(PipeOptions::new())
    }
    /// Like [`open()`](Self::open), but with the given [options](PipeOptions).
    ///
    /// # Errors
    /// [`PipeError::System`] if `pipe()` or applying one of the options fails. In the latter case,
    /// the freshly created descriptors are closed and the pipe is left as it was.
    pub fn open_with(&mut self, options: PipeOptions) -> PipeResult<()> {
        let ends = options.create_ends()?;
        trace!(
            "opened pipe (read fd {}, write fd {})",
            ends.read.0,
            ends.write.0
        );
        if let Some(old) = self.ends.replace(ends) {
            warn!(
                "pipe opened twice, leaking previous descriptors (read fd {}, write fd {})",
                old.read.0, old.write.0
            );
        }
        Ok(())
    }
    /// Closes both descriptors.
    ///
    /// Both are closed even if closing the first one fails, and the pipe is considered closed
    /// afterwards regardless of the outcome.
    ///
    /// # Errors
    /// - [`PipeError::NotOpen`] if the pipe is not open.
    /// - [`PipeError::System`] if either `close()` call fails. If both fail, the error is the one
    ///   from the reading end.
    pub fn close(&mut self) -> PipeResult<()> {
        let ends = self.ends.take().ok_or(PipeError::NotOpen)?;
        trace!(
            "closing pipe (read fd {}, write fd {})",
            ends.read.0,
            ends.write.0
        );
        ends.close()?;
        Ok(())
    }
    /// Whether the pipe is open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.ends.is_some()
    }
    /// Releases ownership of both descriptors without closing them, returning the reading end and
    /// the writing end in that order, or `None` if the pipe is not open.
    #[inline]
    pub fn into_raw_fds(mut self) -> Option<(RawFd, RawFd)> {
        self.ends.take().map(|ends| (ends.read.0, ends.write.0))
    }
}

/// Descriptor access.
///
/// The descriptors returned here are still owned by the pipe: [closing](Pipe::close) or dropping
/// it closes them, even if they were handed to code that considers itself their owner by then.
/// Use [`into_raw_fds()`](Pipe::into_raw_fds) to transfer ownership instead.
impl Pipe {
    /// Returns the descriptor of the reading end, or [`INVALID_FD`] if the pipe is not open.
    #[inline]
    pub fn read_fd(&self) -> RawFd {
        self.ends.map_or(INVALID_FD, |ends| ends.read.0)
    }
    /// Returns the descriptor of the writing end, or [`INVALID_FD`] if the pipe is not open.
    #[inline]
    pub fn write_fd(&self) -> RawFd {
        self.ends.map_or(INVALID_FD, |ends| ends.write.0)
    }
}

/// I/O.
impl Pipe {
    /// Reads up to `buf.len()` bytes from the reading end with a single `read()` call, returning the
    /// number of bytes read.
    ///
    /// Blocks until data is available unless the pipe was opened in
    /// [nonblocking mode](PipeOptions::nonblocking). `Ok(0)` means end of stream: every writing
    /// end has been closed and nothing is left in the pipe buffer.
    ///
    /// # Errors
    /// - [`PipeError::NotOpen`] if the pipe is not open.
    /// - [`PipeError::System`] if `read()` fails.
    #[inline]
    pub fn read(&self, buf: &mut [u8]) -> PipeResult<usize> {
        let ends = self.ends()?;
        Ok((&ends.read).read(buf)?)
    }
    /// Writes bytes from `buf` to the writing end with a single `write()` call, returning the number
    /// of bytes written.
    ///
    /// This may be less than `buf.len()`. The rest is not retried.
    ///
    /// # Errors
    /// - [`PipeError::NotOpen`] if the pipe is not open.
    /// - [`PipeError::System`] if `write()` fails, such as with `EPIPE` when the reading end has
    ///   been closed.
    #[inline]
    pub fn write(&self, buf: &[u8]) -> PipeResult<usize> {
        let ends = self.ends()?;
        Ok((&ends.write).write(buf)?)
    }

    #[inline]
    fn ends(&self) -> PipeResult<Ends> {
        self.ends.ok_or(PipeError::NotOpen)
    }
}

impl Read for &Pipe {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Pipe::read(self, buf)?)
    }
}
impl Read for Pipe {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Pipe::read(self, buf)?)
    }
}
impl Write for &Pipe {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Pipe::write(self, buf)?)
    }
    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        (&self.ends()?.write).flush()
    }
}
impl Write for Pipe {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Pipe::write(self, buf)?)
    }
    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}

impl Drop for Pipe {
    fn drop(&mut self) {
        let Some(ends) = self.ends.take() else { return };
        if let Err(e) = ends.close() {
            error!(
                "failed to close pipe (read fd {}, write fd {}) on drop: {e}",
                ends.read.0, ends.write.0
            );
        }
    }
}

impl Debug for Pipe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("open", &self.is_open())
            .field("read_fd", &self.read_fd())
            .field("write_fd", &self.write_fd())
            .finish()
    }
}
