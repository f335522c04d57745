use super::unixprelude::*;
use std::io::{self, prelude::*};

/// A raw file descriptor with byte-level I/O forwarded straight to the system calls.
///
/// Does not own the descriptor: nothing is closed on drop, and [`close()`](Self::close) has to be
/// called explicitly.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FdOps(pub(crate) RawFd);
impl FdOps {
    /// Closes the descriptor. `EINTR` is not retried, since the descriptor state is unspecified
    /// after it on most systems.
    pub(crate) fn close(self) -> io::Result<()> {
        let success = unsafe { libc::close(self.0) == 0 };
        ok_or_errno!(success => ())
    }
}
impl Read for &FdOps {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let length_to_read = buf.len();

        let (success, bytes_read) = unsafe {
            let size_or_err = libc::read(self.0, buf.as_mut_ptr().cast(), length_to_read);
            (size_or_err >= 0, size_or_err as usize)
        };
        ok_or_errno!(success => bytes_read)
    }
}
impl Write for &FdOps {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let length_to_write = buf.len();

        let (success, bytes_written) = unsafe {
            let size_or_err = libc::write(self.0, buf.as_ptr().cast(), length_to_write);
            (size_or_err >= 0, size_or_err as usize)
        };
        ok_or_errno!(success => bytes_written)
    }
    // Pipes have no user-space buffer, and fsync() fails with EINVAL on them.
    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
impl AsRawFd for FdOps {
    #[inline]
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}
