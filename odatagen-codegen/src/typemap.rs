//! Type mapper.
//!
//! Maps model type references to target-language type expressions. The
//! caller chooses interface or concrete names by position: public surfaces
//! (interface members, synthesized method signatures) use interface names,
//! implementation internals use concrete names.

use crate::error::CodegenError;
use crate::names;
use odatagen_model::{GeneratorConfig, Model, TypeRef};

/// Position a mapped type appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePosition {
    /// Public surface: interface names for class references.
    Interface,
    /// Implementation internals: concrete names for class references.
    Concrete,
}

/// Maps a type reference to a target type expression.
///
/// `context` is the `Namespace.Class.Property` path of the reference, used
/// to locate the offending element when the primitive table has no entry.
/// Collections wrap the inner expression in `IList<T>`; collections of
/// collections are not modeled.
///
/// # Errors
/// Returns `UnknownPrimitive` for a primitive name outside the naming
/// table.
pub fn map_type(
    model: &Model,
    config: &GeneratorConfig,
    type_ref: &TypeRef,
    is_collection: bool,
    position: TypePosition,
    context: &str,
) -> Result<String, CodegenError> {
    let inner = map_scalar(model, config, type_ref, position, context)?;
    Ok(if is_collection {
        format!("System.Collections.Generic.IList<{inner}>")
    } else {
        inner
    })
}

/// Maps a type reference without collection wrapping.
fn map_scalar(
    model: &Model,
    config: &GeneratorConfig,
    type_ref: &TypeRef,
    position: TypePosition,
    context: &str,
) -> Result<String, CodegenError> {
    match type_ref {
        TypeRef::Primitive(name) => names::primitive_type_name(name)
            .map(str::to_string)
            .ok_or_else(|| CodegenError::unknown_primitive(name, context)),
        TypeRef::Named(full) => {
            if let Some(alias) = model.alias(full) {
                // Aliases are transparent in generated code.
                return map_scalar(model, config, &alias.base_type, position, context);
            }
            if model.enum_type(full).is_some() {
                return Ok(names::named_type_name(&full.namespace, &full.name, config));
            }
            Ok(match position {
                TypePosition::Interface => names::named_interface_name(full, config),
                TypePosition::Concrete => {
                    names::named_type_name(&full.namespace, &full.name, config)
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odatagen_model::{Class, ClassKind, EnumType, Namespace, TypeAlias};

    fn test_model() -> Model {
        let mut ns = Namespace::new("Trippin");
        ns.add_class(Class::new("Person", "Trippin", ClassKind::Entity));
        ns.add_enum(EnumType::new("PersonGender", "Trippin"));
        ns.add_alias(TypeAlias::new(
            "UserId",
            "Trippin",
            TypeRef::primitive("String"),
        ));

        let mut model = Model::new();
        model.add_namespace(ns);
        model
    }

    #[test]
    fn test_primitive_mapping() {
        let model = test_model();
        let config = GeneratorConfig::new();
        let mapped = map_type(
            &model,
            &config,
            &TypeRef::primitive("Int32"),
            false,
            TypePosition::Interface,
            "Trippin.Person.Age",
        )
        .unwrap();
        assert_eq!(mapped, "int");
    }

    #[test]
    fn test_unknown_primitive_is_fatal() {
        let model = test_model();
        let config = GeneratorConfig::new();
        let err = map_type(
            &model,
            &config,
            &TypeRef::primitive("Widget"),
            false,
            TypePosition::Interface,
            "Trippin.Person.Age",
        )
        .unwrap_err();
        match err {
            CodegenError::UnknownPrimitive { name, context } => {
                assert_eq!(name, "Widget");
                assert_eq!(context, "Trippin.Person.Age");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_class_reference_by_position() {
        let model = test_model();
        let config = GeneratorConfig::new();
        let type_ref = TypeRef::named("Trippin", "Person");

        let interface = map_type(
            &model,
            &config,
            &type_ref,
            false,
            TypePosition::Interface,
            "Trippin.Trip.Owner",
        )
        .unwrap();
        assert_eq!(interface, "IPerson");

        let concrete = map_type(
            &model,
            &config,
            &type_ref,
            false,
            TypePosition::Concrete,
            "Trippin.Trip.Owner",
        )
        .unwrap();
        assert_eq!(concrete, "Person");
    }

    #[test]
    fn test_collection_wrapping() {
        let model = test_model();
        let config = GeneratorConfig::new();
        let mapped = map_type(
            &model,
            &config,
            &TypeRef::named("Trippin", "Person"),
            true,
            TypePosition::Interface,
            "Trippin.Trip.Friends",
        )
        .unwrap();
        assert_eq!(mapped, "System.Collections.Generic.IList<IPerson>");
    }

    #[test]
    fn test_enum_reference_uses_concrete_name() {
        let model = test_model();
        let config = GeneratorConfig::new();
        let mapped = map_type(
            &model,
            &config,
            &TypeRef::named("Trippin", "PersonGender"),
            false,
            TypePosition::Interface,
            "Trippin.Person.Gender",
        )
        .unwrap();
        assert_eq!(mapped, "PersonGender");
    }

    #[test]
    fn test_alias_is_transparent() {
        let model = test_model();
        let config = GeneratorConfig::new();
        let mapped = map_type(
            &model,
            &config,
            &TypeRef::named("Trippin", "UserId"),
            false,
            TypePosition::Interface,
            "Trippin.Person.Id",
        )
        .unwrap();
        assert_eq!(mapped, "string");
    }
}
