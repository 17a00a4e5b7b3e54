//! # Printer Registry
//!
//! The set of printers active for a debugging session.
//!
//! There are two ways a printer can be found for a value:
//!
//! 1. **Structural**: every registered [`Printer`] is offered the value, in registration
//!    order, and the first to accept it wins.
//! 2. **By type name**: a printer registered under an exact type name is used for values
//!    declared with that name, for hosts (or call paths) that skip structural matching.
//!
//! The registry is an ordinary value owned by the host integration layer. It is filled
//! in once at load time (see [`crate::plugin::load`]) and only read afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::{Result, StrviewError};
use crate::memory::MemoryReader;
use crate::printer::{Printer, ValueFormatter};
use crate::types::Value;

/// Registered printers for one session
#[derive(Default)]
pub struct PrinterRegistry
{
    printers: Vec<Arc<dyn Printer>>,
    by_type_name: HashMap<String, Arc<dyn Printer>>,
}

impl PrinterRegistry
{
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Add a structural printer.
    ///
    /// A printer whose [`name`](Printer::name) is already registered is ignored, so
    /// registering twice leaves exactly one entry. Returns whether it was added.
    pub fn register_printer(&mut self, printer: Arc<dyn Printer>) -> bool
    {
        if self.printers.iter().any(|p| p.name() == printer.name()) {
            trace!(printer = printer.name(), "already registered");
            return false;
        }
        debug!(printer = printer.name(), "registered structural printer");
        self.printers.push(printer);
        true
    }

    /// Register `printer` for values whose declared type is exactly `type_name`.
    ///
    /// With `replace`, an existing entry for `type_name` is superseded; the previous
    /// printer is dropped, not kept as a fallback.
    ///
    /// ## Errors
    ///
    /// `DuplicatePrinter` if `type_name` already has a printer and `replace` is false.
    pub fn register_type_printer(&mut self, type_name: impl Into<String>, printer: Arc<dyn Printer>, replace: bool) -> Result<()>
    {
        let type_name = type_name.into();
        if let Some(existing) = self.by_type_name.get(&type_name) {
            if !replace {
                return Err(StrviewError::DuplicatePrinter(type_name));
            }
            if existing.name() != printer.name() {
                warn!(type_name = %type_name, old = existing.name(), new = printer.name(), "superseding type printer");
            }
        }
        debug!(type_name = %type_name, printer = printer.name(), "registered type printer");
        self.by_type_name.insert(type_name, printer);
        Ok(())
    }

    /// Structural printers, in the order they are consulted.
    pub fn printers(&self) -> impl Iterator<Item = &Arc<dyn Printer>>
    {
        self.printers.iter()
    }

    /// The printer registered for `type_name`, if any.
    pub fn type_printer(&self, type_name: &str) -> Option<&Arc<dyn Printer>>
    {
        self.by_type_name.get(type_name)
    }

    /// Number of name-keyed entries.
    pub fn type_printer_count(&self) -> usize
    {
        self.by_type_name.len()
    }

    /// Find a formatter for `value`.
    ///
    /// Structural printers are tried first. If none accepts, the name-keyed table is
    /// consulted with the declared type name, then with the alias-stripped name.
    pub fn lookup<'a>(&self, value: &'a dyn Value, memory: &'a dyn MemoryReader) -> Option<Box<dyn ValueFormatter + 'a>>
    {
        if let Some(formatter) = self.printers.iter().find_map(|p| p.lookup(value, memory)) {
            return Some(formatter);
        }

        if self.by_type_name.is_empty() {
            return None;
        }

        let ty = value.declared_type().ok()?;
        if let Some(formatter) = self.lookup_by_type_name(ty.name(), value, memory) {
            return Some(formatter);
        }
        let underlying = ty.strip_typedefs().ok()?;
        if underlying.name() == ty.name() {
            return None;
        }
        self.lookup_by_type_name(underlying.name(), value, memory)
    }

    /// Find a formatter using only the name-keyed table.
    pub fn lookup_by_type_name<'a>(
        &self,
        type_name: &str,
        value: &'a dyn Value,
        memory: &'a dyn MemoryReader,
    ) -> Option<Box<dyn ValueFormatter + 'a>>
    {
        let printer = self.by_type_name.get(type_name)?;
        trace!(type_name, printer = printer.name(), "name-keyed lookup");
        printer.lookup(value, memory)
    }
}

impl std::fmt::Debug for PrinterRegistry
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        let printers: Vec<&str> = self.printers.iter().map(|p| p.name()).collect();
        let mut types: Vec<&str> = self.by_type_name.keys().map(String::as_str).collect();
        types.sort_unstable();
        f.debug_struct("PrinterRegistry")
            .field("printers", &printers)
            .field("by_type_name", &types)
            .finish()
    }
}
