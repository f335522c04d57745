//{
fn main() -> std::io::Result<()> {
	//}
	use std::{
		io::{self, prelude::*},
		thread,
	};
	use unixutils::Pipe;

	let mut pipe = Pipe::new();
	pipe.open()?;
	println!("Pipe opened (read fd {}, write fd {})", pipe.read_fd(), pipe.write_fd());

	let message = "Hello from the writing end!\n";
	let received = thread::scope(|scope| -> io::Result<String> {
		// Reads and writes only need a shared reference, so both ends can be used concurrently.
		let writer = scope.spawn(|| (&pipe).write_all(message.as_bytes()));

		let mut buffer = vec![0; message.len()];
		(&pipe).read_exact(&mut buffer)?;
		writer.join().expect("writer thread panicked")?;
		String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
	})?;
	print!("Reading end received: {received}");
	assert_eq!(received, message);

	pipe.close()?;
	//{
	Ok(())
} //}
