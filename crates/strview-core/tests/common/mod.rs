//! Test doubles for host values.

#![allow(dead_code)]

use std::cell::RefCell;

use strview_core::error::{Result, StrviewError};
use strview_core::memory::{MemoryImage, MemoryReader};
use strview_core::types::{Address, TypeDescriptor, Value};

/// Base address the tests map string contents at.
pub const DATA: u64 = 0x4000;

/// A host value built in memory
#[derive(Debug, Clone)]
pub enum FakeValue
{
    Int(u64),
    Struct
    {
        ty: TypeDescriptor,
        fields: Vec<(String, FakeValue)>,
    },
    /// Type metadata the host can't produce
    Opaque,
}

impl Value for FakeValue
{
    fn declared_type(&self) -> Result<TypeDescriptor>
    {
        match self {
            FakeValue::Int(_) => Ok(TypeDescriptor::new("unsigned long", Vec::<String>::new())),
            FakeValue::Struct { ty, .. } => Ok(ty.clone()),
            FakeValue::Opaque => Err(StrviewError::TypeUnavailable("opaque".to_string())),
        }
    }

    fn field(&self, name: &str) -> Result<Box<dyn Value + '_>>
    {
        match self {
            FakeValue::Struct { fields, .. } => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| Box::new(value.clone()) as Box<dyn Value>)
                .ok_or_else(|| StrviewError::FieldNotFound(name.to_string())),
            _ => Err(StrviewError::FieldNotFound(name.to_string())),
        }
    }

    fn as_u64(&self) -> Result<u64>
    {
        match self {
            FakeValue::Int(v) => Ok(*v),
            _ => Err(StrviewError::NotAnInteger("aggregate".to_string())),
        }
    }
}

/// A struct value of type `ty` whose fields are the given integers.
pub fn struct_value(ty: TypeDescriptor, fields: &[(&str, u64)]) -> FakeValue
{
    FakeValue::Struct {
        ty,
        fields: fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), FakeValue::Int(*value)))
            .collect(),
    }
}

/// A value of type `type_name` with the three string fields.
pub fn string_value(type_name: &str, data: u64, size: u64, capacity: u64) -> FakeValue
{
    struct_value(
        TypeDescriptor::new(type_name, ["data", "size", "capacity"]),
        &[("data", data), ("size", size), ("capacity", capacity)],
    )
}

/// Memory with `bytes` mapped at [`DATA`].
pub fn memory_with(bytes: &[u8]) -> MemoryImage
{
    let mut memory = MemoryImage::new();
    memory.map(Address::new(DATA), bytes.to_vec());
    memory
}

/// Memory that can be rewritten while a formatter borrows it, like a debuggee that
/// runs between two display requests.
#[derive(Default)]
pub struct LiveMemory(pub RefCell<MemoryImage>);

impl MemoryReader for LiveMemory
{
    fn read_memory(&self, address: Address, len: usize) -> Result<Vec<u8>>
    {
        self.0.borrow().read_memory(address, len)
    }
}
