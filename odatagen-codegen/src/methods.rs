//! Capability rules and method synthesis.
//!
//! For each class, in namespace then declaration order, the synthesizer
//! applies the capability rule table to decide which operations exist on
//! the generated surface:
//!
//! - abstract entities are never directly addressable or mutable, so their
//!   entire query and mutation surface is suppressed;
//! - concrete entities with a declared key get the full fetcher surface
//!   (Fetch, Execute, Expand, Update, Delete, Save);
//! - concrete entities without a key keep the set-level surface (Execute,
//!   Expand, Add) but none of the key-addressed operations;
//! - media entities additionally get an Add operation whose visibility is
//!   configurable;
//! - complex types carry data accessors only; the service class carries
//!   entity sets and singletons instead of methods.
//!
//! Synthesized descriptors are a side table consumed by the writers; the
//! model itself is never mutated.

use crate::error::CodegenError;
use crate::names;
use crate::typemap::{self, TypePosition};
use odatagen_model::{Class, ClassKind, GeneratorConfig, Model, Property, Visibility};

/// Operation family of a synthesized method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Fetch a single instance by key.
    Fetch,
    /// Finalize and execute a query.
    Execute,
    /// Eager-load a navigation property.
    Expand,
    /// Update an instance.
    Update,
    /// Delete an instance.
    Delete,
    /// Flush pending changes.
    Save,
    /// Append an instance to a collection.
    Add,
    /// Convert to an ancestor type.
    Upcast,
}

/// Return type of a synthesized method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    /// Asynchronous completion marker, optionally carrying a result type.
    /// Operations that fire and eventually complete never return a bare
    /// value.
    Completion(Option<String>),
    /// Direct value, used by synchronous conversions.
    Instance(String),
}

impl ReturnType {
    /// Renders the target type expression.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Completion(None) => "System.Threading.Tasks.Task".to_string(),
            Self::Completion(Some(inner)) => {
                format!("System.Threading.Tasks.Task<{inner}>")
            }
            Self::Instance(inner) => inner.clone(),
        }
    }

    /// True for the completion marker.
    #[must_use]
    pub const fn is_completion(&self) -> bool {
        matches!(self, Self::Completion(_))
    }
}

/// Parameter of a synthesized method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Target type expression.
    pub type_expr: String,
    /// Parameter name.
    pub name: String,
    /// Default value literal, if any.
    pub default: Option<String>,
}

impl Parameter {
    /// Creates a required parameter.
    #[must_use]
    pub fn new(type_expr: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_expr: type_expr.into(),
            name: name.into(),
            default: None,
        }
    }

    /// Creates a parameter with a default literal.
    #[must_use]
    pub fn with_default(
        type_expr: impl Into<String>,
        name: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            type_expr: type_expr.into(),
            name: name.into(),
            default: Some(default.into()),
        }
    }

    /// Renders the parameter as it appears in a signature.
    #[must_use]
    pub fn render(&self) -> String {
        match &self.default {
            Some(default) => format!("{} {} = {}", self.type_expr, self.name, default),
            None => format!("{} {}", self.type_expr, self.name),
        }
    }
}

/// Synthesized method descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Operation family.
    pub kind: MethodKind,
    /// Generated method name.
    pub name: String,
    /// Declared visibility.
    pub visibility: Visibility,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Return type.
    pub return_type: ReturnType,
    /// Request-path literal for operations that address the service by
    /// type-cast segment. Namespace segments honor
    /// `omit_method_namespace_in_uri_paths`.
    pub path: Option<String>,
}

impl Method {
    /// Renders the method signature without a body.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<String> = self.parameters.iter().map(Parameter::render).collect();
        format!(
            "{} {}({})",
            self.return_type.render(),
            self.name,
            params.join(", ")
        )
    }
}

/// Classified service-container property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerElement {
    /// Queryable collection of entities.
    EntitySet {
        /// Set name.
        name: String,
        /// Qualified name of the entity type.
        entity_type: String,
    },
    /// Single well-known entity instance.
    Singleton {
        /// Singleton name.
        name: String,
        /// Qualified name of the entity type.
        entity_type: String,
    },
}

/// Synthesizes the method surface for a class.
///
/// Complex and Service classes synthesize no methods here: complex types
/// carry only data accessors and the service surface comes from
/// [`classify_container_property`].
///
/// # Errors
/// Returns `UnknownPrimitive` for an unmapped key-property type and
/// propagates inheritance errors found while walking the upcast chain.
pub fn synthesize(
    model: &Model,
    class: &Class,
    config: &GeneratorConfig,
) -> Result<Vec<Method>, CodegenError> {
    match class.kind {
        ClassKind::Complex | ClassKind::Service => Ok(Vec::new()),
        ClassKind::Entity | ClassKind::MediaEntity => synthesize_entity(model, class, config),
    }
}

fn synthesize_entity(
    model: &Model,
    class: &Class,
    config: &GeneratorConfig,
) -> Result<Vec<Method>, CodegenError> {
    let mut methods = Vec::new();
    if class.is_abstract {
        // Abstract entities keep only upcasts; the whole fetcher surface
        // is suppressed.
        append_upcasts(model, class, config, &mut methods)?;
        return Ok(methods);
    }

    let interface = names::concrete_interface_name(class, config);
    let addressable = !class.key.is_empty();

    if addressable {
        methods.push(fetch_method(model, class, config, &interface)?);
    }

    methods.push(Method {
        kind: MethodKind::Execute,
        name: "ExecuteAsync".to_string(),
        visibility: Visibility::Public,
        parameters: Vec::new(),
        return_type: ReturnType::Completion(Some(interface.clone())),
        path: None,
    });
    methods.push(Method {
        kind: MethodKind::Expand,
        name: "Expand".to_string(),
        visibility: Visibility::Public,
        parameters: vec![Parameter::new("string", "path")],
        return_type: ReturnType::Completion(Some(interface.clone())),
        path: None,
    });

    if addressable {
        methods.push(Method {
            kind: MethodKind::Update,
            name: "UpdateAsync".to_string(),
            visibility: Visibility::Public,
            parameters: vec![
                Parameter::new(interface.clone(), "item"),
                Parameter::with_default("bool", "deferSaveChanges", "false"),
            ],
            return_type: ReturnType::Completion(None),
            path: None,
        });
        methods.push(Method {
            kind: MethodKind::Delete,
            name: "DeleteAsync".to_string(),
            visibility: Visibility::Public,
            parameters: vec![Parameter::with_default("bool", "deferSaveChanges", "false")],
            return_type: ReturnType::Completion(None),
            path: None,
        });
        methods.push(Method {
            kind: MethodKind::Save,
            name: "SaveChangesAsync".to_string(),
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_type: ReturnType::Completion(None),
            path: None,
        });
    }

    methods.push(collection_add_method(class, config));
    append_upcasts(model, class, config, &mut methods)?;

    Ok(methods)
}

/// Builds the fetch-by-key method, one parameter per key property in key
/// declaration order.
fn fetch_method(
    model: &Model,
    class: &Class,
    config: &GeneratorConfig,
    interface: &str,
) -> Result<Method, CodegenError> {
    let mut parameters = Vec::new();
    for property in class.key_properties() {
        let context = format!("{}.{}.{}", class.namespace, class.name, property.name);
        let type_expr = typemap::map_type(
            model,
            config,
            &property.type_ref,
            property.is_collection,
            TypePosition::Interface,
            &context,
        )?;
        parameters.push(Parameter::new(type_expr, names::to_camel_case(&property.name)));
    }

    Ok(Method {
        kind: MethodKind::Fetch,
        name: "GetById".to_string(),
        visibility: Visibility::Public,
        parameters,
        return_type: ReturnType::Completion(Some(interface.to_string())),
        path: None,
    })
}

/// Builds the collection Add method: `Add<Name>Async(item, deferSaveChanges
/// = false)` with a completion-marker return. Media entities take their
/// visibility from configuration; plain entities are always public.
#[must_use]
pub fn collection_add_method(class: &Class, config: &GeneratorConfig) -> Method {
    let visibility = if class.kind == ClassKind::MediaEntity {
        config.media_add_visibility
    } else {
        Visibility::Public
    };

    Method {
        kind: MethodKind::Add,
        name: format!("Add{}Async", class.name),
        visibility,
        parameters: vec![
            Parameter::new(names::concrete_interface_name(class, config), "item"),
            Parameter::with_default("bool", "deferSaveChanges", "false"),
        ],
        return_type: ReturnType::Completion(None),
        path: None,
    }
}

/// Appends one upcast per ancestor, one level at a time up the chain.
fn append_upcasts(
    model: &Model,
    class: &Class,
    config: &GeneratorConfig,
    methods: &mut Vec<Method>,
) -> Result<(), CodegenError> {
    if config.omit_upcast_methods {
        return Ok(());
    }

    for ancestor in upcast_chain(model, class)? {
        let name = names::concrete_type_name(ancestor, config);
        let path = if config.omit_method_namespace_in_uri_paths {
            ancestor.name.clone()
        } else {
            ancestor.full_name().to_string()
        };
        methods.push(Method {
            kind: MethodKind::Upcast,
            name: format!("To{name}"),
            visibility: Visibility::Public,
            parameters: Vec::new(),
            return_type: ReturnType::Instance(names::fetcher_interface_name(ancestor, config)),
            path: Some(path),
        });
    }

    Ok(())
}

/// Resolves the ancestor chain of a class, nearest first.
///
/// # Errors
/// Returns `CyclicInheritance` when the chain loops and `UnknownBaseType`
/// when a base reference resolves to nothing.
pub fn upcast_chain<'a>(model: &'a Model, class: &'a Class) -> Result<Vec<&'a Class>, CodegenError> {
    use odatagen_model::ModelError;
    use std::collections::HashSet;

    let mut chain = Vec::new();
    let mut visited = HashSet::new();
    visited.insert(class.full_name());

    let mut current = class;
    while let Some(base) = &current.base_type {
        if !visited.insert(base.clone()) {
            return Err(ModelError::cyclic(base.to_string()).into());
        }
        let ancestor = model.class(base).ok_or_else(|| {
            ModelError::unknown_base(current.full_name().to_string(), base.to_string())
        })?;
        chain.push(ancestor);
        current = ancestor;
    }

    Ok(chain)
}

/// Classifies a service-container property as an entity set or singleton.
///
/// # Errors
/// Returns `UnsupportedClassKind` when called for a non-Service class and
/// `InvalidServiceProperty` when the property target is not an entity.
pub fn classify_container_property(
    model: &Model,
    class: &Class,
    property: &Property,
) -> Result<ContainerElement, CodegenError> {
    use odatagen_model::ModelError;

    if class.kind != ClassKind::Service {
        return Err(CodegenError::unsupported_kind(
            class.full_name().to_string(),
            class.kind.as_str(),
        ));
    }

    let target = property
        .type_ref
        .as_named()
        .and_then(|full| model.class(full))
        .filter(|c| c.kind.is_entity_kind())
        .ok_or_else(|| {
            ModelError::invalid_service_property(&class.namespace, &class.name, &property.name)
        })?;

    let entity_type = target.full_name().to_string();
    Ok(if property.is_collection {
        ContainerElement::EntitySet {
            name: property.name.clone(),
            entity_type,
        }
    } else {
        ContainerElement::Singleton {
            name: property.name.clone(),
            entity_type,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use odatagen_model::{FullName, Namespace, Property, TypeRef};

    fn person_class(is_abstract: bool, with_key: bool) -> Class {
        let mut person = Class::new("Person", "Trippin", ClassKind::Entity);
        person.is_abstract = is_abstract;
        person.add_property(Property::new("UserName", TypeRef::primitive("String")));
        if with_key {
            person.key = vec!["UserName".to_string()];
        }
        person
    }

    fn model_with(classes: Vec<Class>) -> Model {
        let mut ns = Namespace::new("Trippin");
        for class in classes {
            ns.add_class(class);
        }
        let mut model = Model::new();
        model.add_namespace(ns);
        model
    }

    fn kinds(methods: &[Method]) -> Vec<MethodKind> {
        methods.iter().map(|m| m.kind).collect()
    }

    #[test]
    fn test_abstract_entity_suppresses_fetcher_surface() {
        let model = model_with(vec![person_class(true, true)]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let methods = synthesize(&model, class, &config).unwrap();
        for kind in [
            MethodKind::Fetch,
            MethodKind::Execute,
            MethodKind::Expand,
            MethodKind::Update,
            MethodKind::Delete,
            MethodKind::Save,
            MethodKind::Add,
        ] {
            assert!(
                !kinds(&methods).contains(&kind),
                "abstract entity must not expose {kind:?}"
            );
        }
    }

    #[test]
    fn test_concrete_keyed_entity_gets_full_surface() {
        let model = model_with(vec![person_class(false, true)]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let methods = synthesize(&model, class, &config).unwrap();
        for kind in [
            MethodKind::Fetch,
            MethodKind::Execute,
            MethodKind::Expand,
            MethodKind::Update,
            MethodKind::Delete,
            MethodKind::Save,
        ] {
            let method = methods
                .iter()
                .find(|m| m.kind == kind)
                .unwrap_or_else(|| panic!("missing {kind:?}"));
            assert!(
                method.return_type.is_completion(),
                "{kind:?} must return the completion marker"
            );
        }
    }

    #[test]
    fn test_keyless_concrete_entity_keeps_set_surface_only() {
        let model = model_with(vec![person_class(false, false)]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let methods = synthesize(&model, class, &config).unwrap();
        let present = kinds(&methods);
        assert!(present.contains(&MethodKind::Execute));
        assert!(present.contains(&MethodKind::Expand));
        assert!(present.contains(&MethodKind::Add));
        assert!(!present.contains(&MethodKind::Fetch));
        assert!(!present.contains(&MethodKind::Update));
        assert!(!present.contains(&MethodKind::Delete));
        assert!(!present.contains(&MethodKind::Save));
    }

    #[test]
    fn test_add_method_shape() {
        let model = model_with(vec![person_class(false, true)]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let methods = synthesize(&model, class, &config).unwrap();
        let add = methods.iter().find(|m| m.kind == MethodKind::Add).unwrap();

        assert_eq!(add.name, "AddPersonAsync");
        assert_eq!(add.parameters.len(), 2);
        assert_eq!(add.parameters[0].type_expr, "IPerson");
        assert_eq!(add.parameters[0].name, "item");
        assert_eq!(add.parameters[0].default, None);
        assert_eq!(add.parameters[1].type_expr, "bool");
        assert_eq!(add.parameters[1].name, "deferSaveChanges");
        assert_eq!(add.parameters[1].default.as_deref(), Some("false"));
        assert_eq!(add.return_type, ReturnType::Completion(None));
        assert_eq!(add.visibility, Visibility::Public);
    }

    #[test]
    fn test_add_name_uses_model_name_not_rename() {
        let model = model_with(vec![person_class(false, true)]);
        let config = GeneratorConfig::new().with_class_rename("Trippin", "Person", "Traveler");
        let class = &model.namespaces[0].classes[0];

        let add = collection_add_method(class, &config);
        // The method name is derived from the model name; the item type
        // follows the rename.
        assert_eq!(add.name, "AddPersonAsync");
        assert_eq!(add.parameters[0].type_expr, "ITraveler");
    }

    #[test]
    fn test_media_entity_add_visibility_is_configurable() {
        let mut photo = Class::new("Photo", "Trippin", ClassKind::MediaEntity);
        photo.add_property(Property::new("Id", TypeRef::primitive("Int64")));
        photo.key = vec!["Id".to_string()];
        let model = model_with(vec![photo]);
        let class = &model.namespaces[0].classes[0];

        let default_config = GeneratorConfig::new();
        let add = collection_add_method(class, &default_config);
        assert_eq!(add.visibility, Visibility::Public);

        let mut internal_config = GeneratorConfig::new();
        internal_config.media_add_visibility = Visibility::Internal;
        let add = collection_add_method(class, &internal_config);
        assert_eq!(add.visibility, Visibility::Internal);
    }

    #[test]
    fn test_fetch_parameters_follow_key_order() {
        let mut flight = Class::new("Flight", "Trippin", ClassKind::Entity);
        flight.add_property(Property::new("From", TypeRef::primitive("String")));
        flight.add_property(Property::new("Number", TypeRef::primitive("Int32")));
        flight.key = vec!["Number".to_string(), "From".to_string()];
        let model = model_with(vec![flight]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let methods = synthesize(&model, class, &config).unwrap();
        let fetch = methods.iter().find(|m| m.kind == MethodKind::Fetch).unwrap();
        assert_eq!(fetch.name, "GetById");
        let rendered: Vec<String> = fetch.parameters.iter().map(Parameter::render).collect();
        assert_eq!(rendered, vec!["int number", "string from"]);
    }

    #[test]
    fn test_upcast_chain_nearest_first() {
        let base = Class::new("Person", "Trippin", ClassKind::Entity);
        let mut manager = Class::new("Manager", "Trippin", ClassKind::Entity);
        manager.base_type = Some(FullName::new("Trippin", "Employee"));
        let mut employee = person_class(false, true);
        employee.name = "Employee".to_string();
        employee.base_type = Some(FullName::new("Trippin", "Person"));
        let model = model_with(vec![base, employee, manager]);
        let config = GeneratorConfig::new();

        let manager = &model.namespaces[0].classes[2];
        let methods = synthesize(&model, manager, &config).unwrap();
        let upcasts: Vec<&str> = methods
            .iter()
            .filter(|m| m.kind == MethodKind::Upcast)
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(upcasts, vec!["ToEmployee", "ToPerson"]);
    }

    #[test]
    fn test_omit_upcast_methods() {
        let base = Class::new("Person", "Trippin", ClassKind::Entity);
        let mut employee = person_class(false, true);
        employee.name = "Employee".to_string();
        employee.base_type = Some(FullName::new("Trippin", "Person"));
        let model = model_with(vec![base, employee]);

        let mut config = GeneratorConfig::new();
        config.omit_upcast_methods = true;

        let employee = &model.namespaces[0].classes[1];
        let methods = synthesize(&model, employee, &config).unwrap();
        assert!(methods.iter().all(|m| m.kind != MethodKind::Upcast));
    }

    #[test]
    fn test_upcast_path_honors_namespace_omission() {
        let base = Class::new("Person", "Trippin", ClassKind::Entity);
        let mut employee = person_class(false, true);
        employee.name = "Employee".to_string();
        employee.base_type = Some(FullName::new("Trippin", "Person"));
        let model = model_with(vec![base, employee]);
        let employee = &model.namespaces[0].classes[1];

        let config = GeneratorConfig::new();
        let methods = synthesize(&model, employee, &config).unwrap();
        let upcast = methods.iter().find(|m| m.kind == MethodKind::Upcast).unwrap();
        assert_eq!(upcast.path.as_deref(), Some("Trippin.Person"));
        assert_eq!(upcast.return_type, ReturnType::Instance("IPersonFetcher".to_string()));

        let mut config = GeneratorConfig::new();
        config.omit_method_namespace_in_uri_paths = true;
        let methods = synthesize(&model, employee, &config).unwrap();
        let upcast = methods.iter().find(|m| m.kind == MethodKind::Upcast).unwrap();
        assert_eq!(upcast.path.as_deref(), Some("Person"));
    }

    #[test]
    fn test_cyclic_inheritance_fails_upcast_walk() {
        let mut a = Class::new("A", "Trippin", ClassKind::Entity);
        a.base_type = Some(FullName::new("Trippin", "B"));
        let mut b = Class::new("B", "Trippin", ClassKind::Entity);
        b.base_type = Some(FullName::new("Trippin", "A"));
        let model = model_with(vec![a, b]);
        let config = GeneratorConfig::new();

        let class = &model.namespaces[0].classes[0];
        let err = synthesize(&model, class, &config).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::Model(odatagen_model::ModelError::CyclicInheritance { .. })
        ));
    }

    #[test]
    fn test_complex_class_has_no_methods() {
        let location = Class::new("Location", "Trippin", ClassKind::Complex);
        let model = model_with(vec![location]);
        let config = GeneratorConfig::new();

        let class = &model.namespaces[0].classes[0];
        let methods = synthesize(&model, class, &config).unwrap();
        assert!(methods.is_empty());
    }

    #[test]
    fn test_container_classification() {
        let person = person_class(false, true);
        let mut container = Class::new("Container", "Trippin", ClassKind::Service);
        container.add_property(Property::collection(
            "People",
            TypeRef::named("Trippin", "Person"),
        ));
        container.add_property(Property::new("Me", TypeRef::named("Trippin", "Person")));
        let model = model_with(vec![person, container]);

        let container = &model.namespaces[0].classes[1];
        let people =
            classify_container_property(&model, container, &container.properties[0]).unwrap();
        assert_eq!(
            people,
            ContainerElement::EntitySet {
                name: "People".to_string(),
                entity_type: "Trippin.Person".to_string(),
            }
        );

        let me = classify_container_property(&model, container, &container.properties[1]).unwrap();
        assert_eq!(
            me,
            ContainerElement::Singleton {
                name: "Me".to_string(),
                entity_type: "Trippin.Person".to_string(),
            }
        );
    }

    #[test]
    fn test_container_classification_rejects_non_service() {
        let person = person_class(false, true);
        let model = model_with(vec![person]);
        let class = &model.namespaces[0].classes[0];
        let property = &class.properties[0];

        let err = classify_container_property(&model, class, property).unwrap_err();
        match err {
            CodegenError::UnsupportedClassKind { class, kind } => {
                assert_eq!(class, "Trippin.Person");
                assert_eq!(kind, "Entity");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_method_signature_rendering() {
        let method = Method {
            kind: MethodKind::Add,
            name: "AddPersonAsync".to_string(),
            visibility: Visibility::Public,
            parameters: vec![
                Parameter::new("IPerson", "item"),
                Parameter::with_default("bool", "deferSaveChanges", "false"),
            ],
            return_type: ReturnType::Completion(None),
            path: None,
        };
        assert_eq!(
            method.signature(),
            "System.Threading.Tasks.Task AddPersonAsync(IPerson item, bool deferSaveChanges = false)"
        );
    }
}
