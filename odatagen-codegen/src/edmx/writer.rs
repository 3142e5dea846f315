//! Canonical markup writer.
//!
//! Serializes a model in namespace, then class, then property declaration
//! order. The order is an invariant: output text is compared verbatim
//! across runs, so identical input must produce byte-identical output.

use crate::error::CodegenError;
use crate::methods::{self, ContainerElement};
use odatagen_model::{Class, ClassKind, EnumType, Model, Namespace, Property, TypeAlias};

const EDM_XMLNS: &str = "http://docs.oasis-open.org/odata/ns/edm";
const EDMX_XMLNS: &str = "http://docs.oasis-open.org/odata/ns/edmx";

/// Serializes a model to canonical markup.
///
/// With `envelope` set, the document is wrapped in the XML declaration and
/// the `edmx:Edmx` element; the `edmx:DataServices` element is always
/// present.
///
/// # Errors
/// Returns the first classification error encountered; no partial output
/// is produced on failure.
pub fn to_edmx(model: &Model, envelope: bool) -> Result<String, CodegenError> {
    let mut output = String::new();

    if envelope {
        output.push_str(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
        );
        output.push_str(&format!(
            "<edmx:Edmx Version=\"4.0\" xmlns:edmx=\"{EDMX_XMLNS}\">"
        ));
    }
    output.push_str("<edmx:DataServices>");

    let schemas: Result<Vec<String>, CodegenError> = model
        .namespaces
        .iter()
        .map(|ns| namespace_to_edmx(model, ns))
        .collect();
    output.push_str(&schemas?.join("\n"));

    output.push_str("</edmx:DataServices>");
    if envelope {
        output.push_str("</edmx:Edmx>");
    }

    Ok(output)
}

fn namespace_to_edmx(model: &Model, namespace: &Namespace) -> Result<String, CodegenError> {
    let mut children = Vec::new();
    for class in &namespace.classes {
        children.push(class_to_edmx(model, class)?);
    }
    for enum_type in &namespace.enums {
        children.push(enum_to_edmx(enum_type));
    }
    for alias in &namespace.aliases {
        children.push(alias_to_edmx(alias));
    }

    Ok(format!(
        "<Schema Namespace=\"{}\" xmlns=\"{}\">{}</Schema>",
        namespace.name,
        EDM_XMLNS,
        children.join("\n")
    ))
}

fn class_to_edmx(model: &Model, class: &Class) -> Result<String, CodegenError> {
    let tag = match class.kind {
        ClassKind::Complex => "ComplexType",
        ClassKind::Entity | ClassKind::MediaEntity => "EntityType",
        ClassKind::Service => "EntityContainer",
    };

    let mut attrs = format!(" Name=\"{}\"", class.name);
    if let Some(base) = &class.base_type {
        attrs.push_str(&format!(" BaseType=\"{base}\""));
    }
    if class.is_abstract {
        attrs.push_str(" Abstract=\"true\"");
    }
    if class.is_open {
        attrs.push_str(" OpenType=\"true\"");
    }
    if class.has_stream() {
        attrs.push_str(" HasStream=\"true\"");
    }

    let mut children = Vec::new();
    if class.kind.is_entity_kind() && !class.key.is_empty() {
        children.push(key_to_edmx(class));
    }
    for property in &class.properties {
        children.push(property_to_edmx(model, class, property)?);
    }

    // Empty containers still emit both tags to keep the markup
    // structurally valid.
    Ok(format!("<{tag}{attrs}>{}</{tag}>", children.join("\n")))
}

fn key_to_edmx(class: &Class) -> String {
    let refs: Vec<String> = class
        .key
        .iter()
        .map(|name| format!("<PropertyRef Name=\"{name}\"/>"))
        .collect();
    format!("<Key>{}</Key>", refs.join("\n"))
}

fn property_to_edmx(
    model: &Model,
    class: &Class,
    property: &Property,
) -> Result<String, CodegenError> {
    if class.kind == ClassKind::Service {
        return Ok(
            match methods::classify_container_property(model, class, property)? {
                ContainerElement::EntitySet { name, entity_type } => {
                    format!("<EntitySet Name=\"{name}\" EntityType=\"{entity_type}\" />")
                }
                ContainerElement::Singleton { name, entity_type } => {
                    format!("<Singleton Name=\"{name}\" Type=\"{entity_type}\" />")
                }
            },
        );
    }

    let tag = if model.is_navigation(class, property) {
        "NavigationProperty"
    } else {
        "Property"
    };

    let mut edm_type = property.type_ref.full_name();
    if property.is_collection {
        edm_type = format!("Collection({edm_type})");
    }

    Ok(format!(
        "<{tag} Name=\"{}\" Type=\"{edm_type}\" />",
        property.name
    ))
}

fn enum_to_edmx(enum_type: &EnumType) -> String {
    let members: Vec<String> = enum_type
        .members
        .iter()
        .map(|m| format!("<Member Name=\"{}\"/>", m.name))
        .collect();
    format!(
        "<EnumType Name=\"{}\">{}</EnumType>",
        enum_type.name,
        members.join("\n")
    )
}

fn alias_to_edmx(alias: &TypeAlias) -> String {
    let mut attrs = format!(
        " Name=\"{}\" UnderlyingType=\"{}\"",
        alias.name,
        alias.base_type.full_name()
    );
    if alias.is_open {
        attrs.push_str(" OpenType=\"true\"");
    }
    if alias.is_nullable {
        attrs.push_str(" Nullable=\"true\"");
    }
    format!("<TypeDefinition{attrs}/>")
}
