//! String formatter for `data`/`size`/`capacity` values.
//!
//! `size` is authoritative: the summary shows exactly `size` bytes starting at `data`,
//! embedded NULs included, and never scans for a terminator. `capacity >= size` is not
//! checked; whatever the value holds is shown.

use tracing::trace;

use super::{DisplayHint, Elements, Printer, ValueFormatter};
use crate::error::{Result, StrviewError};
use crate::memory::MemoryReader;
use crate::types::{Address, Value};

/// Summary of a string whose `data` pointer is null.
pub const NULL_SENTINEL: &str = "<null>";

/// Summary of a string whose fields or contents can't be read.
pub const INVALID_SENTINEL: &str = "<invalid string>";

/// The three fields, as read at one moment.
#[derive(Debug, Clone, Copy)]
struct RawString
{
    data: Address,
    size: u64,
    capacity: u64,
}

/// Formatter bound to one string-shaped value
///
/// ```rust
/// # use strview_core::error::{Result, StrviewError};
/// # use strview_core::types::{TypeDescriptor, Value};
/// # struct Int(u64);
/// # impl Value for Int {
/// #     fn declared_type(&self) -> Result<TypeDescriptor> { Ok(TypeDescriptor::new("u64", Vec::<String>::new())) }
/// #     fn field(&self, name: &str) -> Result<Box<dyn Value + '_>> { Err(StrviewError::FieldNotFound(name.into())) }
/// #     fn as_u64(&self) -> Result<u64> { Ok(self.0) }
/// # }
/// # struct Str;
/// # impl Value for Str {
/// #     fn declared_type(&self) -> Result<TypeDescriptor> { Ok(TypeDescriptor::new("kstring", ["data", "size", "capacity"])) }
/// #     fn field(&self, name: &str) -> Result<Box<dyn Value + '_>> {
/// #         Ok(Box::new(Int(match name { "data" => 0x1000, "size" => 2, _ => 8 })))
/// #     }
/// #     fn as_u64(&self) -> Result<u64> { Err(StrviewError::NotAnInteger("kstring".into())) }
/// # }
/// use strview_core::memory::MemoryImage;
/// use strview_core::printer::{StringFormatter, ValueFormatter};
/// use strview_core::types::Address;
///
/// let mut memory = MemoryImage::new();
/// memory.map(Address::new(0x1000), b"hi".to_vec());
///
/// let formatter = StringFormatter::new(&Str, &memory);
/// assert_eq!(formatter.summary(), "'hi' (size=2, cap=8)");
/// assert_eq!(formatter.children().count(), 2);
/// ```
pub struct StringFormatter<'a>
{
    value: &'a dyn Value,
    memory: &'a dyn MemoryReader,
}

impl<'a> StringFormatter<'a>
{
    pub fn new(value: &'a dyn Value, memory: &'a dyn MemoryReader) -> Self
    {
        Self { value, memory }
    }

    fn read_fields(&self) -> Result<RawString>
    {
        Ok(RawString {
            data: Address::new(self.value.field_u64("data")?),
            size: self.value.field_u64("size")?,
            capacity: self.value.field_u64("capacity")?,
        })
    }

    /// `size` is passed through unchecked; the reader bounds it against mapped memory.
    fn read_contents(&self, raw: RawString) -> Result<Vec<u8>>
    {
        let len = usize::try_from(raw.size).map_err(|_| StrviewError::MemoryRead {
            address: raw.data,
            len: usize::MAX,
        })?;
        self.memory.read_memory(raw.data, len)
    }
}

impl ValueFormatter for StringFormatter<'_>
{
    fn summary(&self) -> String
    {
        let raw = match self.read_fields() {
            Ok(raw) => raw,
            Err(e) => {
                trace!(error = %e, "string fields unreadable");
                return INVALID_SENTINEL.to_string();
            }
        };

        if raw.data.is_null() {
            return NULL_SENTINEL.to_string();
        }

        match self.read_contents(raw) {
            Ok(bytes) => format!(
                "'{}' (size={}, cap={})",
                String::from_utf8_lossy(&bytes),
                raw.size,
                raw.capacity
            ),
            Err(e) => {
                trace!(data = %raw.data, size = raw.size, error = %e, "string contents unreadable");
                INVALID_SENTINEL.to_string()
            }
        }
    }

    fn children(&self) -> Elements<'_>
    {
        match self.read_fields() {
            Ok(raw) if !raw.data.is_null() => Elements::new(self.memory, raw.data, raw.size),
            Ok(_) => Elements::empty(),
            Err(e) => {
                trace!(error = %e, "string fields unreadable");
                Elements::empty()
            }
        }
    }

    fn display_hint(&self) -> DisplayHint
    {
        DisplayHint::Array
    }
}

/// Binds [`StringFormatter`] to any value without checking its shape
///
/// This is what gets registered under an exact type name, for lookups that go by name
/// rather than by structure. A value that turns out not to have the fields displays as
/// [`INVALID_SENTINEL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StringTypePrinter;

impl StringTypePrinter
{
    pub const NAME: &'static str = "string";
}

impl Printer for StringTypePrinter
{
    fn name(&self) -> &str
    {
        Self::NAME
    }

    fn lookup<'a>(&self, value: &'a dyn Value, memory: &'a dyn MemoryReader) -> Option<Box<dyn ValueFormatter + 'a>>
    {
        Some(Box::new(StringFormatter::new(value, memory)))
    }
}
