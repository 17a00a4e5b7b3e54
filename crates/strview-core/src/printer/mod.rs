//! # Printers
//!
//! A [`Printer`] decides whether it can display a value; if it can, it hands back a
//! [`ValueFormatter`] bound to that value for the rest of the display request.
//!
//! The host drives everything: it may ask a formatter for its summary, its children,
//! both, or neither, in any order. Formatters hold no state besides the borrowed value
//! and memory reader, so each call reads the debuggee afresh.
//!
//! - [`shape`]: structural matching on a type's field names
//! - [`string`]: the `data`/`size`/`capacity` string formatter

use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::memory::MemoryReader;
use crate::types::{Address, Value};

pub mod shape;
pub mod string;

pub use shape::{has_string_shape, StringShapeMatcher, REQUIRED_FIELDS};
pub use string::{StringFormatter, StringTypePrinter, INVALID_SENTINEL, NULL_SENTINEL};

/// Something that may know how to display a value
///
/// Printers are registered once and shared for the whole session, so they must be
/// `Send + Sync` and keep no per-value state.
pub trait Printer: Send + Sync
{
    /// Stable name, used to deduplicate registrations.
    fn name(&self) -> &str;

    /// Bind a formatter to `value`, or decline with `None`.
    ///
    /// Must not panic and must not report errors: a value this printer can't handle,
    /// for whatever reason, is simply declined.
    fn lookup<'a>(&self, value: &'a dyn Value, memory: &'a dyn MemoryReader) -> Option<Box<dyn ValueFormatter + 'a>>;
}

/// How the host should lay out a formatter's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayHint
{
    /// Flat list labelled `[0]`, `[1]`, ...
    Array,
    /// Alternating key/value children
    Map,
}

impl fmt::Display for DisplayHint
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            DisplayHint::Array => f.write_str("array"),
            DisplayHint::Map => f.write_str("map"),
        }
    }
}

/// A formatter bound to one value for one display request
pub trait ValueFormatter
{
    /// One-line text shown for the value itself.
    fn summary(&self) -> String;

    /// Lazily read child elements. Each call starts a new traversal.
    fn children(&self) -> Elements<'_>;

    fn display_hint(&self) -> DisplayHint;
}

/// One element of a string, read from the debuggee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element
{
    pub index: u64,
    pub address: Address,
    pub value: u8,
}

impl Element
{
    /// Display label, `[index]`.
    pub fn label(&self) -> String
    {
        format!("[{}]", self.index)
    }
}

impl fmt::Display for Element
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "[{}] = {}", self.index, self.value)
    }
}

/// Lazy, finite sequence of the bytes at `base .. base + count`
///
/// Nothing is read until `next()` is called, and each call reads exactly one byte, so a
/// host that stops early never touches the rest. The sequence ends after `count`
/// elements, or at the first byte that can't be read (or whose address would overflow);
/// once ended it stays ended.
pub struct Elements<'a>
{
    memory: Option<&'a dyn MemoryReader>,
    base: Address,
    next: u64,
    count: u64,
}

impl<'a> Elements<'a>
{
    pub fn new(memory: &'a dyn MemoryReader, base: Address, count: u64) -> Self
    {
        Self {
            memory: Some(memory),
            base,
            next: 0,
            count,
        }
    }

    /// A sequence with no elements that never reads memory.
    pub fn empty() -> Self
    {
        Self {
            memory: None,
            base: Address::ZERO,
            next: 0,
            count: 0,
        }
    }

    fn finish(&mut self)
    {
        self.memory = None;
    }
}

impl Iterator for Elements<'_>
{
    type Item = Element;

    fn next(&mut self) -> Option<Self::Item>
    {
        let memory = self.memory?;
        if self.next >= self.count {
            self.finish();
            return None;
        }

        let index = self.next;
        let Some(address) = self.base.checked_add(index) else {
            trace!(base = %self.base, index, "element address overflows");
            self.finish();
            return None;
        };

        match memory.read_u8(address) {
            Ok(value) => {
                self.next += 1;
                Some(Element { index, address, value })
            }
            Err(e) => {
                trace!(%address, index, error = %e, "stopping element enumeration");
                self.finish();
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>)
    {
        if self.memory.is_none() {
            return (0, Some(0));
        }
        (0, usize::try_from(self.count - self.next).ok())
    }
}

impl FusedIterator for Elements<'_> {}

impl fmt::Debug for Elements<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Elements")
            .field("base", &self.base)
            .field("next", &self.next)
            .field("count", &self.count)
            .field("finished", &self.memory.is_none())
            .finish()
    }
}
