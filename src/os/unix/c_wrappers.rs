use super::{unixprelude::*, FdOps};
use std::io;

/// Creates a pipe with a single `pipe()` call, returning the reading end and the writing end in
/// that order.
pub(crate) fn pipe() -> io::Result<(FdOps, FdOps)> {
    let mut fds: [c_int; 2] = [-1; 2];
    let success = unsafe { libc::pipe(fds.as_mut_ptr()) == 0 };
    let [rd, wr] = fds;
    ok_or_errno!(success => (FdOps(rd), FdOps(wr)))
}

unsafe fn fcntl_int(fd: FdOps, cmd: c_int, val: c_int) -> io::Result<c_int> {
    let val = unsafe { libc::fcntl(fd.as_raw_fd(), cmd, val) };
    ok_or_errno!(val != -1 => val)
}

pub(crate) fn get_fdflags(fd: FdOps) -> io::Result<c_int> {
    unsafe { fcntl_int(fd, libc::F_GETFD, 0) }
}
fn set_fdflags(fd: FdOps, flags: c_int) -> io::Result<()> {
    unsafe { fcntl_int(fd, libc::F_SETFD, flags) }.map(drop)
}
pub(crate) fn set_cloexec(fd: FdOps) -> io::Result<()> {
    set_fdflags(fd, get_fdflags(fd)? | libc::FD_CLOEXEC)
}

pub(crate) fn get_flflags(fd: FdOps) -> io::Result<c_int> {
    unsafe { fcntl_int(fd, libc::F_GETFL, 0) }
}
fn set_flflags(fd: FdOps, flags: c_int) -> io::Result<()> {
    unsafe { fcntl_int(fd, libc::F_SETFL, flags) }.map(drop)
}
pub(crate) fn set_nonblocking(fd: FdOps) -> io::Result<()> {
    set_flflags(fd, get_flflags(fd)? | libc::O_NONBLOCK)
}
