//! Naming resolver.
//!
//! Pure, deterministic identifier derivation: the same model and
//! configuration always yield the same names. Rename overrides are checked
//! before falling back to the model name; the primitive table is total over
//! the model's fixed primitive vocabulary.

use odatagen_model::{Class, FullName, GeneratorConfig};

/// Returns the concrete implementation-class name for a class, honoring
/// configured rename overrides.
#[must_use]
pub fn concrete_type_name(class: &Class, config: &GeneratorConfig) -> String {
    named_type_name(&class.namespace, &class.name, config)
}

/// Returns the interface name for a class: the concrete name with the
/// conventional `I` affix.
#[must_use]
pub fn concrete_interface_name(class: &Class, config: &GeneratorConfig) -> String {
    format!("I{}", concrete_type_name(class, config))
}

/// Returns the fetcher interface name for a class.
#[must_use]
pub fn fetcher_interface_name(class: &Class, config: &GeneratorConfig) -> String {
    format!("I{}Fetcher", concrete_type_name(class, config))
}

/// Returns the fetcher implementation-class name for a class.
#[must_use]
pub fn fetcher_type_name(class: &Class, config: &GeneratorConfig) -> String {
    format!("{}Fetcher", concrete_type_name(class, config))
}

/// Returns the collection interface name for a class.
#[must_use]
pub fn collection_interface_name(class: &Class, config: &GeneratorConfig) -> String {
    format!("I{}Collection", concrete_type_name(class, config))
}

/// Resolves a rename-aware type name for a qualified reference.
#[must_use]
pub fn named_type_name(namespace: &str, name: &str, config: &GeneratorConfig) -> String {
    config
        .rename_for(namespace, name)
        .unwrap_or(name)
        .to_string()
}

/// Resolves a rename-aware interface name for a qualified reference.
#[must_use]
pub fn named_interface_name(full: &FullName, config: &GeneratorConfig) -> String {
    format!("I{}", named_type_name(&full.namespace, &full.name, config))
}

/// Maps a source namespace to its proxy namespace.
///
/// An explicit mapping wins; otherwise the configured prefix, if any, is
/// prepended to the source name.
#[must_use]
pub fn proxy_namespace(namespace: &str, config: &GeneratorConfig) -> String {
    if let Some(mapped) = config.namespace_map.get(namespace) {
        return mapped.clone();
    }
    match &config.namespace_prefix {
        Some(prefix) => format!("{prefix}.{namespace}"),
        None => namespace.to_string(),
    }
}

/// Applies the configured casing override to a property or method
/// identifier.
#[must_use]
pub fn property_name(name: &str, config: &GeneratorConfig) -> String {
    if config.force_property_casing {
        to_pascal_case(name)
    } else {
        name.to_string()
    }
}

/// Converts an identifier to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if c == '_' || c == '-' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Converts an identifier to camelCase, used for parameter names.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => pascal,
    }
}

/// Maps a semantic primitive name to its target type expression.
///
/// The table is fixed; a name outside it means the model references a
/// primitive the generator does not know, which callers report as a fatal
/// `UnknownPrimitive` error.
#[must_use]
pub fn primitive_type_name(name: &str) -> Option<&'static str> {
    match name {
        "Boolean" => Some("bool"),
        "Byte" => Some("byte"),
        "SByte" => Some("sbyte"),
        "Int16" => Some("short"),
        "Int32" => Some("int"),
        "Int64" => Some("long"),
        "Single" => Some("float"),
        "Double" => Some("double"),
        "Decimal" => Some("decimal"),
        "String" => Some("string"),
        "Guid" => Some("System.Guid"),
        "DateTimeOffset" => Some("System.DateTimeOffset"),
        "Duration" => Some("System.TimeSpan"),
        "TimeOfDay" => Some("System.TimeSpan"),
        "Date" => Some("System.DateTime"),
        "Binary" => Some("byte[]"),
        "Stream" => Some("System.IO.Stream"),
        _ => None,
    }
}
