//! A minimal debugger host.
//!
//! Loads the string printers the way a debugger does at plugin load time, then
//! displays a few values captured from a debuggee snapshot: a healthy string, a null
//! one, one with a dangling `data` pointer, and an unrelated struct.
//!
//! Logs go to `~/.strview/`, as they would inside a real host:
//!
//! ```text
//! RUST_LOG=strview_core=trace cargo run -p strview-core --example host
//! ```

use std::process;

use strview_core::error::{Result, StrviewError};
use strview_core::memory::MemoryImage;
use strview_core::plugin::{load, PluginConfig};
use strview_core::printer::ValueFormatter;
use strview_core::registry::PrinterRegistry;
use strview_core::types::{Address, TypeDescriptor, Value};
use strview_utils::init_logging_for_plugin;

/// A snapshot of one debuggee variable
enum Snapshot
{
    Scalar(u64),
    Struct
    {
        ty: TypeDescriptor,
        fields: Vec<(&'static str, Snapshot)>,
    },
}

impl Snapshot
{
    fn aggregate(ty: TypeDescriptor, fields: &[(&'static str, u64)]) -> Self
    {
        Snapshot::Struct {
            ty,
            fields: fields.iter().map(|&(name, raw)| (name, Snapshot::Scalar(raw))).collect(),
        }
    }
}

impl Value for Snapshot
{
    fn declared_type(&self) -> Result<TypeDescriptor>
    {
        match self {
            Snapshot::Scalar(_) => Ok(TypeDescriptor::new("uint64_t", Vec::<String>::new())),
            Snapshot::Struct { ty, .. } => Ok(ty.clone()),
        }
    }

    fn field(&self, name: &str) -> Result<Box<dyn Value + '_>>
    {
        let Snapshot::Struct { fields, .. } = self else {
            return Err(StrviewError::FieldNotFound(name.to_string()));
        };
        fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| Box::new(value) as Box<dyn Value + '_>)
            .ok_or_else(|| StrviewError::FieldNotFound(name.to_string()))
    }

    fn as_u64(&self) -> Result<u64>
    {
        match self {
            Snapshot::Scalar(raw) => Ok(*raw),
            Snapshot::Struct { ty, .. } => Err(StrviewError::NotAnInteger(ty.name().to_string())),
        }
    }
}

impl Value for &Snapshot
{
    fn declared_type(&self) -> Result<TypeDescriptor>
    {
        (**self).declared_type()
    }

    fn field(&self, name: &str) -> Result<Box<dyn Value + '_>>
    {
        (**self).field(name)
    }

    fn as_u64(&self) -> Result<u64>
    {
        (**self).as_u64()
    }
}

fn main()
{
    match init_logging_for_plugin(None) {
        Ok(path) => println!("logging to {}", path.display()),
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(1);
        }
    }

    let mut registry = PrinterRegistry::new();
    load(&mut registry, &PluginConfig::from_env());

    let mut memory = MemoryImage::new();
    memory.map(Address::new(0x7000_1000), b"/boot/kernel.elf\0".to_vec());

    let string = TypeDescriptor::new("String", ["data", "size", "capacity"]);
    let variables = [
        (
            "path",
            Snapshot::aggregate(
                TypeDescriptor::alias("path_t", string.clone()),
                &[("data", 0x7000_1000), ("size", 16), ("capacity", 17)],
            ),
        ),
        (
            "empty",
            Snapshot::aggregate(string.clone(), &[("data", 0), ("size", 0), ("capacity", 0)]),
        ),
        (
            "freed",
            Snapshot::aggregate(string, &[("data", 0xdead_beef), ("size", 4), ("capacity", 8)]),
        ),
        (
            "origin",
            Snapshot::aggregate(TypeDescriptor::new("Point", ["x", "y"]), &[("x", 0), ("y", 0)]),
        ),
    ];

    for (name, value) in &variables {
        match registry.lookup(value, &memory) {
            Some(formatter) => show(name, &*formatter),
            None => {
                let type_name = value.declared_type().map(|ty| ty.name().to_string()).unwrap_or_default();
                println!("{name} = <raw {type_name}>");
            }
        }
    }
}

fn show(name: &str, formatter: &dyn ValueFormatter)
{
    println!("{name} = {}", formatter.summary());

    // first few elements only; the rest are never read
    let elements: Vec<String> = formatter
        .children()
        .take(4)
        .map(|e| format!("{}={}", e.label(), e.value))
        .collect();
    if !elements.is_empty() {
        println!("    {}: {} ...", formatter.display_hint(), elements.join(" "));
    }
}
