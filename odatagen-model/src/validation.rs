//! Structural validation of models and configurations.
//!
//! The external metadata reader is trusted for well-formedness of names and
//! ordering; this pass only enforces the invariants code shape depends on:
//! acyclic inheritance, entity-typed service properties, declared key
//! properties, and collision-free rename overrides.

use crate::config::GeneratorConfig;
use crate::error::ModelError;
use crate::model::{Class, ClassKind, Model, Namespace};
use std::collections::HashSet;

/// Validates a model for structural correctness.
///
/// # Errors
/// Returns the first [`ModelError`] encountered, in namespace then
/// declaration order.
pub fn validate_model(model: &Model) -> Result<(), ModelError> {
    for namespace in &model.namespaces {
        for class in &namespace.classes {
            validate_inheritance(model, class)?;
            validate_keys(class)?;
            if class.kind == ClassKind::Service {
                validate_service_properties(model, class)?;
            }
        }
    }
    Ok(())
}

/// Validates a configuration against a model.
///
/// Runs before any emission so that a conflicting configuration never
/// produces partial output.
///
/// # Errors
/// Returns `RenameCollision` when a rename override makes two classes in
/// the same namespace resolve to the same name.
pub fn validate_config(model: &Model, config: &GeneratorConfig) -> Result<(), ModelError> {
    for namespace in &model.namespaces {
        validate_renames(namespace, config)?;
    }
    Ok(())
}

/// Walks the base-type chain of a class, rejecting cycles and dangling
/// references.
fn validate_inheritance(model: &Model, class: &Class) -> Result<(), ModelError> {
    let mut visited = HashSet::new();
    visited.insert(class.full_name());

    let mut current = class;
    while let Some(base) = &current.base_type {
        if !visited.insert(base.clone()) {
            return Err(ModelError::cyclic(base.to_string()));
        }
        current = model
            .class(base)
            .ok_or_else(|| ModelError::unknown_base(current.full_name().to_string(), base.to_string()))?;
    }

    Ok(())
}

/// Checks that every key entry names a declared property.
fn validate_keys(class: &Class) -> Result<(), ModelError> {
    for key in &class.key {
        if class.property(key).is_none() {
            return Err(ModelError::MissingKeyProperty {
                namespace: class.namespace.clone(),
                class: class.name.clone(),
                key: key.clone(),
            });
        }
    }
    Ok(())
}

/// Checks that every service property references an Entity-kind class.
fn validate_service_properties(model: &Model, class: &Class) -> Result<(), ModelError> {
    for property in &class.properties {
        if !model.is_entity_ref(&property.type_ref) {
            return Err(ModelError::invalid_service_property(
                &class.namespace,
                &class.name,
                &property.name,
            ));
        }
    }
    Ok(())
}

/// Checks rename overrides for collisions within one namespace.
fn validate_renames(namespace: &Namespace, config: &GeneratorConfig) -> Result<(), ModelError> {
    let mut resolved = HashSet::new();

    for class in &namespace.classes {
        let name = config
            .rename_for(&namespace.name, &class.name)
            .unwrap_or(&class.name)
            .to_string();
        if !resolved.insert(name.clone()) {
            return Err(ModelError::RenameCollision {
                namespace: namespace.name.clone(),
                class: class.name.clone(),
                renamed_to: name,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FullName, Property, TypeRef};

    fn model_with_classes(classes: Vec<Class>) -> Model {
        let mut ns = Namespace::new("Trippin");
        for class in classes {
            ns.add_class(class);
        }
        let mut model = Model::new();
        model.add_namespace(ns);
        model
    }

    #[test]
    fn test_valid_inheritance_chain() {
        let base = Class::new("Person", "Trippin", ClassKind::Entity);
        let mut derived = Class::new("Employee", "Trippin", ClassKind::Entity);
        derived.base_type = Some(FullName::new("Trippin", "Person"));

        let model = model_with_classes(vec![base, derived]);
        assert!(validate_model(&model).is_ok());
    }

    #[test]
    fn test_cyclic_inheritance_rejected() {
        let mut a = Class::new("A", "Trippin", ClassKind::Entity);
        a.base_type = Some(FullName::new("Trippin", "B"));
        let mut b = Class::new("B", "Trippin", ClassKind::Entity);
        b.base_type = Some(FullName::new("Trippin", "A"));

        let model = model_with_classes(vec![a, b]);
        let err = validate_model(&model).unwrap_err();
        assert!(matches!(err, ModelError::CyclicInheritance { .. }));
    }

    #[test]
    fn test_unknown_base_rejected() {
        let mut class = Class::new("Employee", "Trippin", ClassKind::Entity);
        class.base_type = Some(FullName::new("Trippin", "Missing"));

        let model = model_with_classes(vec![class]);
        let err = validate_model(&model).unwrap_err();
        match err {
            ModelError::UnknownBaseType { class, base } => {
                assert_eq!(class, "Trippin.Employee");
                assert_eq!(base, "Trippin.Missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_undeclared_key_rejected() {
        let mut class = Class::new("Person", "Trippin", ClassKind::Entity);
        class.key = vec!["UserName".to_string()];

        let model = model_with_classes(vec![class]);
        let err = validate_model(&model).unwrap_err();
        assert!(matches!(err, ModelError::MissingKeyProperty { .. }));
    }

    #[test]
    fn test_service_property_must_be_entity() {
        let person = Class::new("Person", "Trippin", ClassKind::Entity);
        let mut container = Class::new("Container", "Trippin", ClassKind::Service);
        container.add_property(Property::collection(
            "People",
            TypeRef::named("Trippin", "Person"),
        ));
        container.add_property(Property::new("Label", TypeRef::primitive("String")));

        let model = model_with_classes(vec![person, container]);
        let err = validate_model(&model).unwrap_err();
        match err {
            ModelError::InvalidServiceProperty { property, .. } => {
                assert_eq!(property, "Label");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rename_collision_rejected() {
        let person = Class::new("Person", "Trippin", ClassKind::Entity);
        let trip = Class::new("Trip", "Trippin", ClassKind::Entity);
        let model = model_with_classes(vec![person, trip]);

        let config = GeneratorConfig::new().with_class_rename("Trippin", "Trip", "Person");
        let err = validate_config(&model, &config).unwrap_err();
        match err {
            ModelError::RenameCollision {
                namespace,
                class,
                renamed_to,
            } => {
                assert_eq!(namespace, "Trippin");
                assert_eq!(class, "Trip");
                assert_eq!(renamed_to, "Person");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_disjoint_renames_accepted() {
        let person = Class::new("Person", "Trippin", ClassKind::Entity);
        let trip = Class::new("Trip", "Trippin", ClassKind::Entity);
        let model = model_with_classes(vec![person, trip]);

        let config = GeneratorConfig::new().with_class_rename("Trippin", "Trip", "Journey");
        assert!(validate_config(&model, &config).is_ok());
    }
}
