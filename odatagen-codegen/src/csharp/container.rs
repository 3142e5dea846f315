//! Service container source generation.
//!
//! The service class becomes the context root: one collection-typed
//! property per entity set and one fetcher-typed property per singleton,
//! classified by the same rules as method synthesis.

use crate::error::CodegenError;
use crate::methods::{self, ContainerElement};
use crate::names;
use odatagen_model::{Class, GeneratorConfig, Model, ModelError};

/// Generator for the service container declaration.
pub struct ContainerGenerator<'a> {
    model: &'a Model,
    config: &'a GeneratorConfig,
}

impl<'a> ContainerGenerator<'a> {
    /// Creates a new container generator.
    #[must_use]
    pub fn new(model: &'a Model, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Generates the container interface and class.
    ///
    /// # Errors
    /// Returns `UnsupportedClassKind` for a non-Service class and
    /// propagates classification errors for non-entity properties.
    pub fn generate(&self, class: &Class) -> Result<String, CodegenError> {
        let interface = names::concrete_interface_name(class, self.config);
        let concrete = names::concrete_type_name(class, self.config);

        let mut members = Vec::new();
        for property in &class.properties {
            let element = methods::classify_container_property(self.model, class, property)?;
            let target = property
                .type_ref
                .as_named()
                .and_then(|full| self.model.class(full))
                .ok_or_else(|| {
                    ModelError::invalid_service_property(
                        &class.namespace,
                        &class.name,
                        &property.name,
                    )
                })?;
            let (type_expr, name) = match element {
                ContainerElement::EntitySet { name, .. } => (
                    names::collection_interface_name(target, self.config),
                    name,
                ),
                ContainerElement::Singleton { name, .. } => {
                    (names::fetcher_interface_name(target, self.config), name)
                }
            };
            members.push((type_expr, name));
        }

        let mut output = String::new();
        output.push_str(&format!(
            "    public partial interface {interface}\n    {{\n"
        ));
        for (type_expr, name) in &members {
            output.push_str(&format!("        {type_expr} {name} {{ get; }}\n"));
        }
        output.push_str("    }\n");

        output.push_str(&format!(
            "    public partial class {concrete} : ServiceContext, {interface}\n    {{\n"
        ));
        for (type_expr, name) in &members {
            output.push_str(&format!("        public {type_expr} {name} {{ get; }}\n"));
        }
        output.push_str("    }\n");

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odatagen_model::{ClassKind, Namespace, Property, TypeRef};

    fn trippin_model() -> Model {
        let mut person = Class::new("Person", "Trippin", ClassKind::Entity);
        person.add_property(Property::new("UserName", TypeRef::primitive("String")));
        person.key = vec!["UserName".to_string()];

        let mut container = Class::new("DefaultContainer", "Trippin", ClassKind::Service);
        container.add_property(Property::collection(
            "People",
            TypeRef::named("Trippin", "Person"),
        ));
        container.add_property(Property::new("Me", TypeRef::named("Trippin", "Person")));

        let mut ns = Namespace::new("Trippin");
        ns.add_class(person);
        ns.add_class(container);
        let mut model = Model::new();
        model.add_namespace(ns);
        model
    }

    #[test]
    fn test_entity_set_and_singleton_members() {
        let model = trippin_model();
        let config = GeneratorConfig::new();
        let container = &model.namespaces[0].classes[1];

        let output = ContainerGenerator::new(&model, &config)
            .generate(container)
            .unwrap();
        assert!(output.contains("public partial interface IDefaultContainer"));
        assert!(output.contains("IPersonCollection People { get; }"));
        assert!(output.contains("IPersonFetcher Me { get; }"));
        assert!(output.contains(
            "public partial class DefaultContainer : ServiceContext, IDefaultContainer"
        ));
    }

    #[test]
    fn test_non_service_class_rejected() {
        let model = trippin_model();
        let person = &model.namespaces[0].classes[0];

        // Wiring a person property through container classification is a
        // rule-table violation.
        let err = methods::classify_container_property(&model, person, &person.properties[0])
            .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedClassKind { .. }));
    }
}
