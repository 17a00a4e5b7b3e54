//! Structural matching.
//!
//! A value is string-shaped when its underlying type declares `data`, `size` and
//! `capacity`. The type's name plays no part, so every alias or ABI-identical
//! redefinition of the same string layout matches without being listed anywhere.

use tracing::trace;

use super::{Printer, StringFormatter, ValueFormatter};
use crate::memory::MemoryReader;
use crate::types::{TypeDescriptor, Value};

/// Fields a type must declare to be displayed as a string.
pub const REQUIRED_FIELDS: [&str; 3] = ["data", "size", "capacity"];

/// Whether `ty`, after stripping aliases, declares all of [`REQUIRED_FIELDS`].
///
/// An alias chain that can't be resolved is not string-shaped.
pub fn has_string_shape(ty: &TypeDescriptor) -> bool
{
    ty.strip_typedefs().is_ok_and(|underlying| underlying.has_fields(&REQUIRED_FIELDS))
}

/// Printer that accepts any string-shaped value
#[derive(Debug, Clone, Copy, Default)]
pub struct StringShapeMatcher;

impl StringShapeMatcher
{
    pub const NAME: &'static str = "string-shape";
}

impl Printer for StringShapeMatcher
{
    fn name(&self) -> &str
    {
        Self::NAME
    }

    fn lookup<'a>(&self, value: &'a dyn Value, memory: &'a dyn MemoryReader) -> Option<Box<dyn ValueFormatter + 'a>>
    {
        let ty = match value.declared_type() {
            Ok(ty) => ty,
            Err(e) => {
                trace!(error = %e, "type metadata unavailable, declining");
                return None;
            }
        };

        if !has_string_shape(&ty) {
            trace!(type_name = ty.name(), "not string-shaped");
            return None;
        }

        trace!(type_name = ty.name(), "matched string shape");
        Some(Box::new(StringFormatter::new(value, memory)))
    }
}
