//! Canonical markup reader.
//!
//! Reconstructs a model from writer output for round-trip regression
//! verification. The reader understands exactly the canonical subset the
//! writer emits; anything else is an error, never a silent skip.

use crate::error::{CodegenError, ParseError};
use odatagen_model::{
    Class, ClassKind, EnumMember, EnumType, FullName, Model, ModelError, Namespace, Property,
    TypeAlias, TypeRef,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Parses canonical markup into a model.
///
/// # Errors
/// Returns `ParseError` for malformed or unknown markup and
/// `BadNavigationTarget` when a declared navigation property resolves to a
/// non-entity type.
pub fn parse_edmx(xml: &str) -> Result<Model, CodegenError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut model = Model::new();
    let mut namespace: Option<Namespace> = None;
    let mut class: Option<Class> = None;
    let mut enum_type: Option<EnumType> = None;
    let mut in_key = false;
    // Declared navigation properties, checked against the finished model.
    let mut navigations: Vec<(String, String, String, String)> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes).map_err(ParseError::from)?;
                match name {
                    "edmx:Edmx" | "edmx:DataServices" => {}
                    "Schema" => {
                        namespace = Some(Namespace::new(require_attr(e, "Namespace", name)?));
                    }
                    "EntityType" | "ComplexType" | "EntityContainer" => {
                        let ns = namespace
                            .as_ref()
                            .ok_or_else(|| ParseError::OutsideSchema {
                                element: name.to_string(),
                            })?;
                        class = Some(parse_class(e, name, &ns.name)?);
                    }
                    "EnumType" => {
                        let ns = namespace
                            .as_ref()
                            .ok_or_else(|| ParseError::OutsideSchema {
                                element: name.to_string(),
                            })?;
                        enum_type = Some(EnumType::new(
                            require_attr(e, "Name", name)?,
                            ns.name.clone(),
                        ));
                    }
                    "Key" => in_key = true,
                    other => {
                        return Err(ParseError::unknown_element(other, context(&namespace, &class))
                            .into());
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes).map_err(ParseError::from)?;
                match name {
                    "PropertyRef" if in_key => {
                        if let Some(class) = class.as_mut() {
                            class.key.push(require_attr(e, "Name", name)?);
                        }
                    }
                    "Property" | "NavigationProperty" => {
                        let owner = class.as_mut().ok_or_else(|| {
                            ParseError::unknown_element(name, "document")
                        })?;
                        let prop_name = require_attr(e, "Name", name)?;
                        let (type_ref, is_collection) =
                            parse_type_attr(&require_attr(e, "Type", name)?);
                        if name == "NavigationProperty" {
                            navigations.push((
                                owner.namespace.clone(),
                                owner.name.clone(),
                                prop_name.clone(),
                                type_ref.full_name(),
                            ));
                        }
                        owner.add_property(Property {
                            name: prop_name,
                            type_ref,
                            is_collection,
                        });
                    }
                    "EntitySet" => {
                        let owner = class.as_mut().ok_or_else(|| {
                            ParseError::unknown_element(name, "document")
                        })?;
                        let (type_ref, _) =
                            parse_type_attr(&require_attr(e, "EntityType", name)?);
                        owner.add_property(Property::collection(
                            require_attr(e, "Name", name)?,
                            type_ref,
                        ));
                    }
                    "Singleton" => {
                        let owner = class.as_mut().ok_or_else(|| {
                            ParseError::unknown_element(name, "document")
                        })?;
                        let (type_ref, _) = parse_type_attr(&require_attr(e, "Type", name)?);
                        owner.add_property(Property::new(
                            require_attr(e, "Name", name)?,
                            type_ref,
                        ));
                    }
                    "Member" => {
                        if let Some(enum_type) = enum_type.as_mut() {
                            enum_type.add_member(EnumMember::new(require_attr(e, "Name", name)?));
                        }
                    }
                    "TypeDefinition" => {
                        let ns = namespace
                            .as_mut()
                            .ok_or_else(|| ParseError::OutsideSchema {
                                element: name.to_string(),
                            })?;
                        let (base_type, _) =
                            parse_type_attr(&require_attr(e, "UnderlyingType", name)?);
                        let mut alias =
                            TypeAlias::new(require_attr(e, "Name", name)?, ns.name.clone(), base_type);
                        alias.is_open = flag_attr(e, "OpenType")?;
                        alias.is_nullable = flag_attr(e, "Nullable")?;
                        ns.add_alias(alias);
                    }
                    other => {
                        return Err(ParseError::unknown_element(other, context(&namespace, &class))
                            .into());
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes).map_err(ParseError::from)?;
                match name {
                    "Schema" => {
                        if let Some(ns) = namespace.take() {
                            model.add_namespace(ns);
                        }
                    }
                    "EntityType" | "ComplexType" | "EntityContainer" => {
                        if let (Some(ns), Some(finished)) = (namespace.as_mut(), class.take()) {
                            ns.add_class(finished);
                        }
                    }
                    "EnumType" => {
                        if let (Some(ns), Some(finished)) = (namespace.as_mut(), enum_type.take()) {
                            ns.add_enum(finished);
                        }
                    }
                    "Key" => in_key = false,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(ParseError::Xml(e).into()),
        }
        buf.clear();
    }

    check_navigation_targets(&model, &navigations)?;
    Ok(model)
}

/// Builds a class from its opening tag.
fn parse_class(e: &BytesStart<'_>, tag: &str, namespace: &str) -> Result<Class, ParseError> {
    let kind = match tag {
        "ComplexType" => ClassKind::Complex,
        "EntityContainer" => ClassKind::Service,
        _ if flag_attr(e, "HasStream")? => ClassKind::MediaEntity,
        _ => ClassKind::Entity,
    };

    let mut class = Class::new(require_attr(e, "Name", tag)?, namespace, kind);
    if let Some(base) = attr_value(e, "BaseType")? {
        class.base_type = FullName::parse(&base);
    }
    class.is_abstract = flag_attr(e, "Abstract")?;
    class.is_open = flag_attr(e, "OpenType")?;
    Ok(class)
}

/// Parses a type attribute, unwrapping `Collection(T)` and the `Edm.`
/// primitive prefix.
fn parse_type_attr(value: &str) -> (TypeRef, bool) {
    let (inner, is_collection) = match value
        .strip_prefix("Collection(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => (inner, true),
        None => (value, false),
    };

    let type_ref = match inner.strip_prefix("Edm.") {
        Some(primitive) => TypeRef::primitive(primitive),
        None => match FullName::parse(inner) {
            Some(full) => TypeRef::Named(full),
            // Primitives are the only non-namespaced type names.
            None => TypeRef::primitive(inner),
        },
    };

    (type_ref, is_collection)
}

/// Verifies every declared navigation property targets an Entity-kind
/// class.
fn check_navigation_targets(
    model: &Model,
    navigations: &[(String, String, String, String)],
) -> Result<(), CodegenError> {
    for (namespace, class, property, target) in navigations {
        let resolved = FullName::parse(target).and_then(|full| model.class(&full));
        if !resolved.is_some_and(|c| c.kind.is_entity_kind()) {
            return Err(ModelError::BadNavigationTarget {
                namespace: namespace.clone(),
                class: class.clone(),
                property: property.clone(),
                target: target.clone(),
            }
            .into());
        }
    }
    Ok(())
}

fn attr_value(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, ParseError> {
    for attr in e.attributes().flatten() {
        if std::str::from_utf8(attr.key.as_ref())? == name {
            return Ok(Some(std::str::from_utf8(&attr.value)?.to_string()));
        }
    }
    Ok(None)
}

fn require_attr(e: &BytesStart<'_>, name: &str, element: &str) -> Result<String, ParseError> {
    attr_value(e, name)?.ok_or_else(|| ParseError::missing_attr(element, name))
}

fn flag_attr(e: &BytesStart<'_>, name: &str) -> Result<bool, ParseError> {
    Ok(attr_value(e, name)?.as_deref() == Some("true"))
}

fn context(namespace: &Option<Namespace>, class: &Option<Class>) -> String {
    match (namespace, class) {
        (Some(ns), Some(class)) => format!("{}.{}", ns.name, class.name),
        (Some(ns), None) => ns.name.clone(),
        _ => "document".to_string(),
    }
}
