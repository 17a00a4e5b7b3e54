//! Tests for error handling

use strview_core::error::{Result, StrviewError};
use strview_core::types::Address;

#[test]
fn test_memory_read_display()
{
    let error = StrviewError::MemoryRead {
        address: Address::new(0xdead),
        len: 4,
    };
    let message = format!("{}", error);
    assert!(message.contains("4 bytes"));
    assert!(message.contains("0x000000000000dead"));
}

#[test]
fn test_field_not_found_display()
{
    let message = StrviewError::FieldNotFound("capacity".to_string()).to_string();
    assert!(message.contains("Field not found"));
    assert!(message.contains("capacity"));
}

#[test]
fn test_duplicate_printer_display()
{
    let message = StrviewError::DuplicatePrinter("String".to_string()).to_string();
    assert!(message.contains("already registered"));
    assert!(message.contains("String"));
}

#[test]
fn test_result_type()
{
    let _result: Result<()> = Ok(());
    let _error_result: Result<()> = Err(StrviewError::NotAnInteger("data".to_string()));
}
