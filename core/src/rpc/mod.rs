// core/src/rpc/mod.rs
pub mod invoker;
pub mod session;
#[cfg(unix)]
pub mod unix;

pub use invoker::{Close, Invoker};
pub use session::{hello, invoke, ClosingReader};
#[cfg(unix)]
pub use unix::UnixInvoker;
