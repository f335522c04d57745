use crate::{tests::util::*, Pipe};
use color_eyre::eyre::ensure;
use std::io::{self, prelude::*};

#[test]
fn write_all_and_read_to_end() -> TestResult {
    testinit();
    let mut rng = Xorshift32::from_system_time();
    let data = payload(&mut rng, 3000);
    let mut pipe = Pipe::new();
    pipe.open()?;

    (&pipe).write_all(&data)?;
    Write::flush(&mut pipe)?;
    release_write_end(&pipe)?;

    let mut received = Vec::new();
    Read::read_to_end(&mut pipe, &mut received)?;
    ensure!(received == data, "data corrupted in transit");
    pipe.close()?;
    Ok(())
}

#[test]
fn not_open_maps_to_not_connected() -> TestResult {
    testinit();
    let mut pipe = Pipe::new();
    let mut buf = [0; 4];

    let err = Read::read(&mut pipe, &mut buf).unwrap_err();
    ensure_eq!(err.kind(), io::ErrorKind::NotConnected);
    let err = (&pipe).write_all(b"x").unwrap_err();
    ensure_eq!(err.kind(), io::ErrorKind::NotConnected);
    let err = Write::flush(&mut pipe).unwrap_err();
    ensure_eq!(err.kind(), io::ErrorKind::NotConnected);
    ensure_eq!(err.to_string(), "pipe not opened");
    Ok(())
}

#[test]
fn system_errors_pass_through() -> TestResult {
    testinit();
    let mut pipe = Pipe::new();
    pipe.open()?;
    release_read_end(&pipe)?;
    // SIGPIPE is ignored by the Rust runtime, so this surfaces as EPIPE.
    let err = Write::write(&mut &pipe, b"orphaned").unwrap_err();
    ensure_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    ensure_eq!(err.raw_os_error(), Some(libc::EPIPE));
    pipe.close()?;
    Ok(())
}
