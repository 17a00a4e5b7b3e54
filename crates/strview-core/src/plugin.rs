//! # Plugin Loading
//!
//! What a host does once, when the printer is loaded into a debugging session:
//!
//! ```rust
//! use strview_core::plugin::{load, PluginConfig};
//! use strview_core::registry::PrinterRegistry;
//!
//! let mut registry = PrinterRegistry::new();
//! load(&mut registry, &PluginConfig::default());
//!
//! assert_eq!(registry.printers().count(), 1);
//! assert!(registry.type_printer("String").is_some());
//! ```

use std::env;
use std::sync::Arc;

use tracing::{debug, info};

use crate::printer::{Printer, StringShapeMatcher, StringTypePrinter};
use crate::registry::PrinterRegistry;

/// Environment variable listing the fallback type names, comma-separated.
pub const FALLBACK_TYPES_ENV: &str = "STRVIEW_FALLBACK_TYPES";

/// Type name registered by default for name-keyed lookups.
pub const DEFAULT_FALLBACK_TYPE: &str = "String";

/// Load-time settings
///
/// Aliases of the string type are caught by the structural matcher whatever they are
/// called. `fallback_type_names` only matters to hosts that select printers by exact
/// declared name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig
{
    pub fallback_type_names: Vec<String>,
}

impl Default for PluginConfig
{
    fn default() -> Self
    {
        Self {
            fallback_type_names: vec![DEFAULT_FALLBACK_TYPE.to_string()],
        }
    }
}

impl PluginConfig
{
    /// Read settings from `STRVIEW_FALLBACK_TYPES`, falling back to the defaults.
    pub fn from_env() -> Self
    {
        env::var(FALLBACK_TYPES_ENV)
            .ok()
            .and_then(|list| Self::parse_type_list(&list))
            .unwrap_or_default()
    }

    /// Parse a comma-separated type list. `None` if it names no types.
    ///
    /// ```rust
    /// use strview_core::plugin::PluginConfig;
    ///
    /// let config = PluginConfig::parse_type_list(" String, kstring ,,").unwrap();
    /// assert_eq!(config.fallback_type_names, ["String", "kstring"]);
    /// assert!(PluginConfig::parse_type_list(" , ").is_none());
    /// ```
    pub fn parse_type_list(list: &str) -> Option<Self>
    {
        let names: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        (!names.is_empty()).then_some(Self {
            fallback_type_names: names,
        })
    }
}

/// Register the string printers into `registry`.
///
/// Adds the structural matcher, then one name-keyed entry per fallback type name,
/// replacing whatever was registered under those names. Calling this again leaves the
/// registry as it was after the first call.
pub fn load(registry: &mut PrinterRegistry, config: &PluginConfig)
{
    let matcher_added = registry.register_printer(Arc::new(StringShapeMatcher));

    let printer: Arc<dyn Printer> = Arc::new(StringTypePrinter);
    for type_name in &config.fallback_type_names {
        // Infallible with replace set.
        if let Err(e) = registry.register_type_printer(type_name.as_str(), Arc::clone(&printer), true) {
            debug!(type_name = %type_name, error = %e, "type printer not registered");
        }
    }

    if matcher_added {
        info!(
            fallback_types = ?config.fallback_type_names,
            "string printers loaded"
        );
    } else {
        debug!("string printers already loaded");
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_default_config()
    {
        assert_eq!(PluginConfig::default().fallback_type_names, [DEFAULT_FALLBACK_TYPE]);
    }

    #[test]
    fn test_parse_type_list_trims_and_drops_empties()
    {
        let config = PluginConfig::parse_type_list("a,  b ,").unwrap();
        assert_eq!(config.fallback_type_names, ["a", "b"]);
        assert!(PluginConfig::parse_type_list("").is_none());
    }

    #[test]
    fn test_load_registers_every_fallback_name()
    {
        let mut registry = PrinterRegistry::new();
        let config = PluginConfig::parse_type_list("String,kstring").unwrap();
        load(&mut registry, &config);
        assert_eq!(registry.type_printer_count(), 2);
        assert!(registry.type_printer("kstring").is_some());
    }
}
