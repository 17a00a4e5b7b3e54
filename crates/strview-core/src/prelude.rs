//! Common module for library exports

pub use crate::error::{Result, StrviewError};
pub use crate::memory::{MemoryImage, MemoryReader};
pub use crate::plugin::{load, PluginConfig};
pub use crate::printer::{DisplayHint, Element, Elements, Printer, ValueFormatter};
pub use crate::registry::PrinterRegistry;
pub use crate::types::{Address, TypeDescriptor, Value};
