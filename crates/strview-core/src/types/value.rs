//! Host value and type model.
//!
//! The debugger host owns the real value/type objects. It exposes them to the printer
//! through the [`Value`] trait, describing each value's type as a [`TypeDescriptor`].

use std::collections::HashSet;

use crate::error::{Result, StrviewError};

/// Longest alias chain [`TypeDescriptor::strip_typedefs`] will follow.
pub const MAX_TYPEDEF_DEPTH: usize = 32;

/// Declared type of a runtime value
///
/// A type is either a concrete aggregate (a name plus its fields in declaration order)
/// or an alias (`typedef`/`using`) that points at another descriptor. Aliases carry no
/// fields of their own.
///
/// ```rust
/// use strview_core::types::TypeDescriptor;
///
/// let string = TypeDescriptor::new("kstring", ["data", "size", "capacity"]);
/// let alias = TypeDescriptor::alias("path_t", string.clone());
///
/// assert!(alias.fields().is_empty());
/// assert_eq!(alias.strip_typedefs().unwrap(), &string);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor
{
    name: String,
    fields: Vec<String>,
    target: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor
{
    /// Describe a concrete type with the given field names.
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
            target: None,
        }
    }

    /// Describe an alias of `target`.
    pub fn alias(name: impl Into<String>, target: TypeDescriptor) -> Self
    {
        Self {
            name: name.into(),
            fields: Vec::new(),
            target: Some(Box::new(target)),
        }
    }

    /// Declared name, exactly as the host reports it.
    pub fn name(&self) -> &str
    {
        &self.name
    }

    /// Field names in declaration order. Empty for aliases.
    pub fn fields(&self) -> &[String]
    {
        &self.fields
    }

    pub fn is_alias(&self) -> bool
    {
        self.target.is_some()
    }

    /// Follow alias links down to the underlying type.
    ///
    /// Layers may repeat a name (a `typedef` shadowing one in another namespace).
    ///
    /// ## Errors
    ///
    /// `TypeUnavailable` if the chain has more than [`MAX_TYPEDEF_DEPTH`] aliases.
    pub fn strip_typedefs(&self) -> Result<&TypeDescriptor>
    {
        let mut current = self;
        let mut depth = 0;
        while let Some(target) = current.target.as_deref() {
            depth += 1;
            if depth > MAX_TYPEDEF_DEPTH {
                return Err(StrviewError::TypeUnavailable(format!(
                    "alias chain of {} is deeper than {MAX_TYPEDEF_DEPTH}",
                    self.name
                )));
            }
            current = target;
        }
        Ok(current)
    }

    /// Whether this type (not its alias target) declares every name in `required`.
    ///
    /// Extra fields are ignored.
    pub fn has_fields(&self, required: &[&str]) -> bool
    {
        let declared: HashSet<&str> = self.fields.iter().map(String::as_str).collect();
        required.iter().all(|name| declared.contains(name))
    }
}

/// A value living in the debuggee, as exposed by the host
///
/// Implementations are borrowed for a single display request and never stored past it.
/// Every method may fail; callers in this crate treat a failure as "can't display this
/// value", never as fatal.
pub trait Value
{
    /// The value's declared type, aliases not yet stripped.
    ///
    /// ## Errors
    ///
    /// `TypeUnavailable` when the host has no usable type metadata for the value.
    fn declared_type(&self) -> Result<TypeDescriptor>;

    /// Read the named field as another value.
    ///
    /// ## Errors
    ///
    /// `FieldNotFound` if there is no such field, or a host-specific error if the field
    /// can't be read.
    fn field(&self, name: &str) -> Result<Box<dyn Value + '_>>;

    /// Read this value as an unsigned integer or address.
    ///
    /// ## Errors
    ///
    /// `NotAnInteger` for values that aren't scalar, or a host-specific error.
    fn as_u64(&self) -> Result<u64>;

    /// Read the named field as an unsigned integer or address.
    ///
    /// ## Errors
    ///
    /// Anything [`Value::field`] or [`Value::as_u64`] returns.
    fn field_u64(&self, name: &str) -> Result<u64>
    {
        self.field(name)?.as_u64()
    }
}
