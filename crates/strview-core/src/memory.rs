//! # Debuggee Memory
//!
//! The printer never touches debuggee memory directly. It goes through a
//! [`MemoryReader`] supplied by the host, which may fail for any address: the `data`
//! pointer of a string can be dangling, uninitialized or simply garbage.
//!
//! [`MemoryImage`] is an in-process reader over captured byte regions, for hosts that
//! work from snapshots or core images.

use std::collections::BTreeMap;

use tracing::trace;

use crate::error::{Result, StrviewError};
use crate::types::Address;

/// Read access to the debuggee's address space
///
/// A failed read must be reported as an error, never as a short or empty buffer:
/// `Ok(vec![])` means "zero bytes were requested and read".
///
/// ## Untrusted lengths
///
/// `len` comes straight from the debuggee (a string's `size` field) and may be garbage,
/// up to `usize::MAX`. Implementations must check the range against what is actually
/// mapped before allocating a buffer of `len` bytes, and fail the read otherwise.
pub trait MemoryReader
{
    /// Read exactly `len` bytes starting at `address`.
    ///
    /// `len` is untrusted; see the trait docs.
    ///
    /// ## Errors
    ///
    /// `MemoryRead` if any byte of the range can't be read.
    fn read_memory(&self, address: Address, len: usize) -> Result<Vec<u8>>;

    /// Read a single byte.
    ///
    /// ## Errors
    ///
    /// `MemoryRead` if the byte can't be read.
    fn read_u8(&self, address: Address) -> Result<u8>
    {
        let bytes = self.read_memory(address, 1)?;
        bytes.first().copied().ok_or(StrviewError::MemoryRead { address, len: 1 })
    }
}

impl<M: MemoryReader + ?Sized> MemoryReader for &M
{
    fn read_memory(&self, address: Address, len: usize) -> Result<Vec<u8>>
    {
        (**self).read_memory(address, len)
    }
}

/// Byte regions captured from a debuggee, keyed by base address
///
/// A read succeeds only when the whole range lies inside one mapped region. Mapping a
/// region at an existing base replaces it, which is how a host refreshes a region after
/// the debuggee has run.
///
/// ```rust
/// use strview_core::memory::{MemoryImage, MemoryReader};
/// use strview_core::types::Address;
///
/// let mut image = MemoryImage::new();
/// image.map(Address::new(0x1000), b"hello".to_vec());
///
/// assert_eq!(image.read_memory(Address::new(0x1001), 3).unwrap(), b"ell");
/// assert!(image.read_memory(Address::new(0x1003), 4).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryImage
{
    regions: BTreeMap<Address, Vec<u8>>,
}

impl MemoryImage
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Map `bytes` at `base`, replacing any region that starts at the same base.
    pub fn map(&mut self, base: Address, bytes: Vec<u8>)
    {
        self.regions.insert(base, bytes);
    }

    /// Remove the region starting at `base`, returning its bytes.
    pub fn unmap(&mut self, base: Address) -> Option<Vec<u8>>
    {
        self.regions.remove(&base)
    }

    /// Number of mapped regions.
    pub fn len(&self) -> usize
    {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.regions.is_empty()
    }

    /// The region containing `address` with the offset of `address` inside it.
    fn locate(&self, address: Address) -> Option<(&[u8], usize)>
    {
        let (base, bytes) = self.regions.range(..=address).next_back()?;
        let offset = usize::try_from(address.value() - base.value()).ok()?;
        (offset < bytes.len()).then_some((bytes.as_slice(), offset))
    }
}

impl MemoryReader for MemoryImage
{
    fn read_memory(&self, address: Address, len: usize) -> Result<Vec<u8>>
    {
        if len == 0 {
            return Ok(Vec::new());
        }

        let failed = || {
            trace!(%address, len, "read outside mapped regions");
            StrviewError::MemoryRead { address, len }
        };

        let (bytes, offset) = self.locate(address).ok_or_else(failed)?;
        let end = offset.checked_add(len).ok_or_else(failed)?;
        bytes.get(offset..end).map(<[u8]>::to_vec).ok_or_else(failed)
    }
}
