// core/src/lib.rs
//! Value codec and invocation session for calling zero-argument remote
//! functions that return a single string.

pub mod codec;
pub mod error;
pub mod rpc;
pub mod utils;

pub use error::{DecodeError, InvokeError, Stage};
