//! # strview-core
//!
//! Pretty-printing for `data`/`size`/`capacity` strings in a debugger host.
//!
//! This crate provides:
//! - A structural matcher that recognizes string-shaped values by their field names,
//!   whatever their type is called
//! - A formatter that renders a one-line summary and a lazy, indexed view of the
//!   string's bytes, read through the host's memory capability
//! - A printer registry and the load-time registration entry point
//!
//! ## Host contract
//!
//! The host supplies values through [`types::Value`] and memory through
//! [`memory::MemoryReader`]. Both may fail at any point, since the debuggee's memory is
//! untrusted. Printers never return those failures to the host: matching degrades to
//! "no match" and formatting degrades to `<null>` / `<invalid string>` or a shortened
//! element list.
//!
//! ## Example
//!
//! ```rust
//! use strview_core::prelude::*;
//!
//! let mut registry = PrinterRegistry::new();
//! load(&mut registry, &PluginConfig::from_env());
//! ```

pub mod error;
pub mod memory;
pub mod plugin;
pub mod prelude;
pub mod printer;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StrviewError};
pub use printer::{Printer, ValueFormatter};
pub use registry::PrinterRegistry;
