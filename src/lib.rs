#![doc = include_str!("../README.md")]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]
// If this was in Cargo.toml, it would cover examples as well
#![warn(
    missing_docs,
    clippy::panic_in_result_fn,
    clippy::missing_assert_message,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

#[cfg(not(unix))]
compile_error!("unixutils only supports Unix-like platforms");

#[macro_use]
mod macros;

pub mod error;
pub mod pipe;

mod os {
    pub(crate) mod unix;
}

pub use {
    error::{PipeError, PipeResult},
    pipe::{Pipe, PipeOptions, INVALID_FD},
};

#[cfg(test)]
#[path = "../tests/index.rs"]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::indexing_slicing)]
mod tests;
