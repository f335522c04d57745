use crate::{tests::util::*, Pipe, PipeError, PipeOptions};
use color_eyre::eyre::ensure;
use std::io;

fn ends(pipe: &Pipe) -> [std::os::unix::io::RawFd; 2] {
    [pipe.read_fd(), pipe.write_fd()]
}

#[test]
fn defaults_match_plain_pipe() -> TestResult {
    testinit();
    ensure_eq!(PipeOptions::new(), PipeOptions::default());
    let mut pipe = PipeOptions::new().open()?;
    for fd in ends(&pipe) {
        ensure!(fd_flags(fd)? & libc::FD_CLOEXEC == 0, "fd {fd} is close-on-exec");
        ensure!(status_flags(fd)? & libc::O_NONBLOCK == 0, "fd {fd} is nonblocking");
    }
    pipe.close()?;
    Ok(())
}

#[test]
fn close_on_exec() -> TestResult {
    testinit();
    let mut pipe = PipeOptions::new().close_on_exec(true).open()?;
    for fd in ends(&pipe) {
        ensure!(fd_flags(fd)? & libc::FD_CLOEXEC != 0, "fd {fd} is not close-on-exec");
        ensure!(status_flags(fd)? & libc::O_NONBLOCK == 0, "fd {fd} is nonblocking");
    }
    pipe.close()?;
    Ok(())
}

#[test]
fn nonblocking() -> TestResult {
    testinit();
    let mut pipe = PipeOptions::new().nonblocking(true).open()?;
    for fd in ends(&pipe) {
        ensure!(status_flags(fd)? & libc::O_NONBLOCK != 0, "fd {fd} is blocking");
    }

    let mut buf = [0; 8];
    match pipe.read(&mut buf) {
        Err(PipeError::System(e)) if e.kind() == io::ErrorKind::WouldBlock => {}
        other => color_eyre::eyre::bail!("expected WouldBlock on empty pipe, got {other:?}"),
    }
    pipe.close()?;
    Ok(())
}

#[test]
fn open_with_in_place() -> TestResult {
    testinit();
    let mut pipe = Pipe::new();
    pipe.open_with(PipeOptions::new().close_on_exec(true).nonblocking(true))?;
    ensure!(pipe.is_open(), "pipe not open after open_with()");
    for fd in ends(&pipe) {
        ensure!(fd_flags(fd)? & libc::FD_CLOEXEC != 0, "fd {fd} is not close-on-exec");
        ensure!(status_flags(fd)? & libc::O_NONBLOCK != 0, "fd {fd} is blocking");
    }
    pipe.close()?;
    Ok(())
}
