//! # Error Types
//!
//! Errors raised by host capabilities and by the registry.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.
//!
//! None of these reach the host through the matcher or the formatter: the matcher turns
//! them into "no match" and the formatter turns them into sentinel text or a truncated
//! element sequence. Only registry operations return them to the caller.

use thiserror::Error;

use crate::types::Address;

/// Main error type for strview
///
/// ## Error Categories
///
/// 1. **Memory errors**: MemoryRead
/// 2. **Value/type errors**: FieldNotFound, NotAnInteger, TypeUnavailable
/// 3. **Registration errors**: DuplicatePrinter
#[derive(Error, Debug)]
pub enum StrviewError
{
    /// The debuggee's memory could not be read
    ///
    /// This happens when:
    /// - The range is unmapped (a dangling or corrupt `data` pointer)
    /// - The range runs off the end of the address space
    /// - The host couldn't access the process at all (it exited, or is running)
    #[error("Failed to read {len} bytes at {address}")]
    MemoryRead
    {
        /// Start of the range that failed
        address: Address,
        /// Number of bytes requested
        len: usize,
    },

    /// The value has no field with the given name
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// The value can't be read as an integer or address
    #[error("Value is not an integer: {0}")]
    NotAnInteger(String),

    /// The value's type metadata can't be inspected
    ///
    /// Raised by hosts with incomplete debug info, and by
    /// [`TypeDescriptor::strip_typedefs`](crate::types::TypeDescriptor::strip_typedefs)
    /// when an alias chain is deeper than `MAX_TYPEDEF_DEPTH`.
    #[error("Type information unavailable: {0}")]
    TypeUnavailable(String),

    /// A name-keyed printer already exists for this type name and `replace` was not set
    #[error("A printer is already registered for type {0}")]
    DuplicatePrinter(String),
}

/// Convenience type alias for `Result<T, StrviewError>`
///
/// ```rust
/// use strview_core::error::Result;
/// fn foo() -> Result<()>
/// {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, StrviewError>;
