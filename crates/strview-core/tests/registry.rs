//! Tests for the printer registry and load-time registration

mod common;

use std::sync::Arc;

use common::{memory_with, string_value, struct_value, FakeValue, DATA};
use strview_core::memory::MemoryReader;
use strview_core::plugin::{load, PluginConfig};
use strview_core::printer::{Printer, StringShapeMatcher, StringTypePrinter, ValueFormatter};
use strview_core::registry::PrinterRegistry;
use strview_core::types::{TypeDescriptor, Value};

/// Always declines; stands in for some other plugin's printer.
struct Decline;

impl Printer for Decline
{
    fn name(&self) -> &str
    {
        "decline"
    }

    fn lookup<'a>(&self, _value: &'a dyn Value, _memory: &'a dyn MemoryReader) -> Option<Box<dyn ValueFormatter + 'a>>
    {
        None
    }
}

fn loaded() -> PrinterRegistry
{
    let mut registry = PrinterRegistry::new();
    load(&mut registry, &PluginConfig::default());
    registry
}

#[test]
fn test_lookup_uses_structural_matcher()
{
    let registry = loaded();
    let memory = memory_with(b"hi");
    let value = string_value("kstring", DATA, 2, 8);

    let formatter = registry.lookup(&value, &memory).expect("matched");
    assert_eq!(formatter.summary(), "'hi' (size=2, cap=8)");
}

#[test]
fn test_lookup_declines_unrelated_values()
{
    let registry = loaded();
    let memory = memory_with(b"");
    let value = struct_value(TypeDescriptor::new("Point", ["x", "y"]), &[("x", 1), ("y", 2)]);

    assert!(registry.lookup(&value, &memory).is_none());
    assert!(registry.lookup(&FakeValue::Int(1), &memory).is_none());
    assert!(registry.lookup(&FakeValue::Opaque, &memory).is_none());
}

#[test]
fn test_name_keyed_fallback_when_shape_does_not_match()
{
    let registry = loaded();
    let memory = memory_with(b"");
    // right name, wrong layout: only the name-keyed entry picks it up
    let value = struct_value(TypeDescriptor::new("String", ["buffer"]), &[("buffer", DATA)]);

    let formatter = registry.lookup(&value, &memory).expect("found by name");
    assert_eq!(formatter.summary(), "<invalid string>");
}

#[test]
fn test_name_keyed_fallback_through_alias()
{
    let registry = loaded();
    let memory = memory_with(b"");
    let ty = TypeDescriptor::alias("text_t", TypeDescriptor::new("String", ["buffer"]));
    let value = struct_value(ty, &[]);

    assert!(registry.lookup(&value, &memory).is_some());
}

#[test]
fn test_lookup_by_type_name_alone()
{
    let registry = loaded();
    let memory = memory_with(b"ok");
    let value = string_value("whatever", DATA, 2, 2);

    let formatter = registry.lookup_by_type_name("String", &value, &memory).expect("registered");
    assert_eq!(formatter.summary(), "'ok' (size=2, cap=2)");
    assert!(registry.lookup_by_type_name("std::string", &value, &memory).is_none());
}

#[test]
fn test_earlier_printers_take_precedence()
{
    let mut registry = PrinterRegistry::new();
    registry.register_printer(Arc::new(Decline));
    load(&mut registry, &PluginConfig::default());

    let names: Vec<&str> = registry.printers().map(|p| p.name()).collect();
    assert_eq!(names, ["decline", StringShapeMatcher::NAME]);

    let memory = memory_with(b"");
    let value = string_value("kstring", DATA, 0, 0);
    assert!(registry.lookup(&value, &memory).is_some());
}

#[test]
fn test_load_is_idempotent()
{
    let mut registry = loaded();
    load(&mut registry, &PluginConfig::default());
    load(&mut registry, &PluginConfig::default());

    assert_eq!(registry.printers().count(), 1);
    assert_eq!(registry.type_printer_count(), 1);
    assert_eq!(registry.type_printer("String").map(|p| p.name()), Some(StringTypePrinter::NAME));
}

#[test]
fn test_load_supersedes_existing_name_keyed_printer()
{
    let mut registry = PrinterRegistry::new();
    registry.register_type_printer("String", Arc::new(Decline), false).unwrap();
    load(&mut registry, &PluginConfig::default());

    assert_eq!(registry.type_printer_count(), 1);
    assert_eq!(registry.type_printer("String").map(|p| p.name()), Some(StringTypePrinter::NAME));
}
