//! # Types
//!
//! Host-facing types: addresses in the debuggee and the value/type model the host
//! exposes to printers.

pub mod address;
pub mod value;

// Re-export all public types
pub use address::Address;
pub use value::{TypeDescriptor, Value, MAX_TYPEDEF_DEPTH};
