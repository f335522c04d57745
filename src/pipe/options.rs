use super::{Ends, Pipe};
use crate::{error::PipeResult, os::unix::c_wrappers};
use log::warn;
use std::io;

/// A builder for [`Pipe`]s, controlling how the descriptors are set up after they are created.
///
/// The pipe itself is always created with a single `pipe()` call; the flags below are applied to
/// both ends afterwards with `fcntl()`. With the defaults, the result is exactly what `pipe()`
/// returns: blocking descriptors that are inherited by child processes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PipeOptions {
    pub(crate) close_on_exec: bool,
    pub(crate) nonblocking: bool,
}

/// Creation.
impl PipeOptions {
    /// Creates an options table with default values.
    #[inline]
    pub const fn new() -> Self {
        Self {
            close_on_exec: false,
            nonblocking: false,
        }
    }
}

/// Option setters.
impl PipeOptions {
    builder_setters! {
        /// Sets whether `FD_CLOEXEC` is to be set on both ends, so that they are not inherited
        /// across `exec()`.
        ///
        /// This is disabled by default.
        close_on_exec: bool,
        /// Sets whether `O_NONBLOCK` is to be set on both ends. Reads from an empty pipe and writes
        /// to a full one then fail with [`WouldBlock`](io::ErrorKind::WouldBlock) instead of
        /// blocking.
        ///
        /// This is disabled by default.
        nonblocking: bool,
    }
}

/// Pipe constructors.
impl PipeOptions {
    /// Creates an open [`Pipe`].
    ///
    /// # Errors
    /// See [`Pipe::open_with()`].
    #[inline]
    pub fn open(self) -> PipeResult<Pipe> {
        let mut pipe = Pipe::new();
        pipe.open_with(self)?;
        Ok(pipe)
    }

    pub(crate) fn create_ends(self) -> io::Result<Ends> {
        let (read, write) = c_wrappers::pipe()?;
        let ends = Ends { read, write };
        if let Err(e) = self.apply(ends) {
            if let Err(ce) = ends.close() {
                warn!(
                    "failed to close pipe (read fd {}, write fd {}) after setup error: {ce}",
                    ends.read.0, ends.write.0
                );
            }
            return Err(e);
        }
        Ok(ends)
    }
    fn apply(self, ends: Ends) -> io::Result<()> {
        for fd in [ends.read, ends.write] {
            if self.close_on_exec {
                c_wrappers::set_cloexec(fd)?;
            }
            if self.nonblocking {
                c_wrappers::set_nonblocking(fd)?;
            }
        }
        Ok(())
    }
}
