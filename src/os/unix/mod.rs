//! Thin wrappers over the Unix system calls that back [`Pipe`](crate::Pipe).

pub(crate) mod c_wrappers;
mod fdops;

pub(crate) use fdops::FdOps;

mod unixprelude {
    #[allow(unused_imports)]
    pub(super) use {
        libc::c_int,
        std::os::unix::io::{AsRawFd, RawFd},
    };
}
