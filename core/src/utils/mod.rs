// core/src/utils/mod.rs
pub mod config;
pub mod logging;

// Well-known hello interface
pub const HELLO_INSTANCE: &str = "wrpc-examples:hello/handler";
pub const HELLO_FUNCTION: &str = "hello";
pub const DEFAULT_GREETING: &str = "hello from Rust";

// Requests above this size are rejected by the daemon
pub const MAX_REQUEST_BYTES: u64 = 10 * 1024 * 1024;
