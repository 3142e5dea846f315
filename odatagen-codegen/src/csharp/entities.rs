//! Entity source generation.
//!
//! Each entity produces a concrete interface and class carrying its data
//! and navigation properties, a fetcher interface and class carrying the
//! synthesized query and mutation surface, and a collection interface and
//! class carrying the Add operation. The shapes come from the method
//! synthesizer; this module only renders them.

use crate::error::CodegenError;
use crate::methods::{self, Method, MethodKind, ReturnType};
use crate::names;
use crate::typemap::{self, TypePosition};
use odatagen_model::{Class, GeneratorConfig, Model, Visibility};

/// Generator for entity declarations.
pub struct EntityGenerator<'a> {
    model: &'a Model,
    config: &'a GeneratorConfig,
}

impl<'a> EntityGenerator<'a> {
    /// Creates a new entity generator.
    #[must_use]
    pub fn new(model: &'a Model, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Generates all declarations for one entity class.
    ///
    /// # Errors
    /// Propagates naming and synthesis errors; no partial output.
    pub fn generate(&self, class: &Class) -> Result<String, CodegenError> {
        let methods = methods::synthesize(self.model, class, self.config)?;
        let mut output = String::new();

        output.push_str(&self.concrete_interface(class)?);
        output.push_str(&self.concrete_class(class)?);
        output.push_str(&self.fetcher(class, &methods));
        output.push_str(&self.collection(class, &methods));

        Ok(output)
    }

    fn concrete_interface(&self, class: &Class) -> Result<String, CodegenError> {
        let interface = names::concrete_interface_name(class, self.config);
        let base = match &class.base_type {
            Some(full) => format!(" : {}", names::named_interface_name(full, self.config)),
            None => String::new(),
        };

        let mut output = String::new();
        output.push_str(&format!(
            "    public partial interface {interface}{base}\n    {{\n"
        ));
        output.push_str(&self.data_properties(class, true)?);
        output.push_str("    }\n");
        Ok(output)
    }

    fn concrete_class(&self, class: &Class) -> Result<String, CodegenError> {
        let concrete = names::concrete_type_name(class, self.config);
        let interface = names::concrete_interface_name(class, self.config);
        let modifier = if class.is_abstract { "abstract " } else { "" };
        let base = match &class.base_type {
            Some(full) => format!(
                "{}, ",
                names::named_type_name(&full.namespace, &full.name, self.config)
            ),
            None => String::new(),
        };

        let mut output = String::new();
        output.push_str(&format!(
            "    public {modifier}partial class {concrete} : {base}{interface}\n    {{\n"
        ));
        output.push_str(&self.data_properties(class, false)?);
        if class.has_stream() {
            output.push_str("        public System.IO.Stream ContentStream { get; set; }\n");
        }
        if class.is_open {
            output.push_str(
                "        public System.Collections.Generic.IDictionary<string, object> AdditionalData { get; set; }\n",
            );
        }
        output.push_str("    }\n");
        Ok(output)
    }

    /// Emits one auto-property per declared property, navigation included,
    /// in declaration order.
    fn data_properties(&self, class: &Class, interface: bool) -> Result<String, CodegenError> {
        let mut output = String::new();

        for property in &class.properties {
            let context = format!("{}.{}.{}", class.namespace, class.name, property.name);
            let type_expr = typemap::map_type(
                self.model,
                self.config,
                &property.type_ref,
                property.is_collection,
                TypePosition::Interface,
                &context,
            )?;
            let name = names::property_name(&property.name, self.config);
            if interface {
                output.push_str(&format!("        {type_expr} {name} {{ get; set; }}\n"));
            } else {
                output.push_str(&format!(
                    "        public {type_expr} {name} {{ get; set; }}\n"
                ));
            }
        }

        Ok(output)
    }

    /// Emits the fetcher interface and class. Abstract entities keep only
    /// their upcasts here; the rest of the surface was suppressed by the
    /// synthesizer.
    fn fetcher(&self, class: &Class, methods: &[Method]) -> String {
        let interface = names::fetcher_interface_name(class, self.config);
        let concrete = names::fetcher_type_name(class, self.config);
        let surface: Vec<&Method> = methods
            .iter()
            .filter(|m| m.kind != MethodKind::Add)
            .collect();

        let mut output = String::new();
        output.push_str(&format!(
            "    public partial interface {interface}\n    {{\n"
        ));
        for method in &surface {
            if method.visibility == Visibility::Public {
                output.push_str(&format!("        {};\n", method.signature()));
            }
        }
        output.push_str("    }\n");

        output.push_str(&format!(
            "    public partial class {concrete} : EntityFetcher, {interface}\n    {{\n"
        ));
        for method in &surface {
            output.push_str(&render_method(method));
        }
        output.push_str("    }\n");

        output
    }

    /// Emits the collection interface and class. The Add operation joins
    /// the interface only when public; a non-public visibility keeps it on
    /// the class alone.
    fn collection(&self, class: &Class, methods: &[Method]) -> String {
        let interface = names::collection_interface_name(class, self.config);
        let concrete = format!("{}Collection", names::concrete_type_name(class, self.config));
        let add = methods.iter().find(|m| m.kind == MethodKind::Add);

        let mut output = String::new();
        output.push_str(&format!(
            "    public partial interface {interface}\n    {{\n"
        ));
        if let Some(add) = add {
            if add.visibility == Visibility::Public {
                output.push_str(&format!("        {};\n", add.signature()));
            }
        }
        output.push_str("    }\n");

        output.push_str(&format!(
            "    public partial class {concrete} : EntityCollection, {interface}\n    {{\n"
        ));
        if let Some(add) = add {
            output.push_str(&render_method(add));
        }
        output.push_str("    }\n");

        output
    }
}

/// Renders one method with its delegating expression body.
fn render_method(method: &Method) -> String {
    format!(
        "        {} {} => {};\n",
        method.visibility.keyword(),
        method.signature(),
        method_body(method)
    )
}

/// Expression body for a synthesized method, delegating to the client
/// runtime base class.
fn method_body(method: &Method) -> String {
    let result = match &method.return_type {
        ReturnType::Completion(Some(inner)) | ReturnType::Instance(inner) => inner.as_str(),
        ReturnType::Completion(None) => "",
    };

    match method.kind {
        MethodKind::Fetch => {
            let args: Vec<&str> = method.parameters.iter().map(|p| p.name.as_str()).collect();
            format!("GetByKeyAsync<{result}>(new object[] {{ {} }})", args.join(", "))
        }
        MethodKind::Execute => format!("ExecuteSingleAsync<{result}>()"),
        MethodKind::Expand => format!("ExpandAsync<{result}>(path)"),
        MethodKind::Update => "UpdateEntityAsync(item, deferSaveChanges)".to_string(),
        MethodKind::Delete => "DeleteEntityAsync(deferSaveChanges)".to_string(),
        MethodKind::Save => "FlushChangesAsync()".to_string(),
        MethodKind::Add => "InsertEntityAsync(item, deferSaveChanges)".to_string(),
        MethodKind::Upcast => {
            format!("CastTo<{result}>(\"{}\")", method.path.as_deref().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use odatagen_model::{ClassKind, FullName, Namespace, Property, TypeRef};

    fn person_class(is_abstract: bool) -> Class {
        let mut person = Class::new("Person", "Trippin", ClassKind::Entity);
        person.is_abstract = is_abstract;
        person.add_property(Property::new("UserName", TypeRef::primitive("String")));
        person.add_property(Property::collection(
            "Trips",
            TypeRef::named("Trippin", "Trip"),
        ));
        person.key = vec!["UserName".to_string()];
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

    #[test]
    fn test_concrete_entity_full_fetcher_surface() {
        let model = model_with(vec![
            person_class(false),
            Class::new("Trip", "Trippin", ClassKind::Entity),
        ]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let output = EntityGenerator::new(&model, &config).generate(class).unwrap();
        assert!(output.contains("public partial interface IPersonFetcher"));
        for name in [
            "GetById",
            "ExecuteAsync",
            "Expand",
            "UpdateAsync",
            "DeleteAsync",
            "SaveChangesAsync",
        ] {
            assert!(output.contains(name), "missing {name}");
        }
        assert!(output.contains(
            "System.Threading.Tasks.Task AddPersonAsync(IPerson item, bool deferSaveChanges = false);"
        ));
    }

    #[test]
    fn test_abstract_entity_suppresses_surface_keeps_data() {
        let model = model_with(vec![
            person_class(true),
            Class::new("Trip", "Trippin", ClassKind::Entity),
        ]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let output = EntityGenerator::new(&model, &config).generate(class).unwrap();
        assert!(output.contains("public abstract partial class Person"));
        assert!(output.contains("public string UserName { get; set; }"));
        for name in [
            "GetById",
            "ExecuteAsync",
            "Expand(",
            "UpdateAsync",
            "DeleteAsync",
            "SaveChangesAsync",
            "AddPersonAsync",
        ] {
            assert!(!output.contains(name), "abstract entity must not expose {name}");
        }
    }

    #[test]
    fn test_navigation_property_uses_interface_collection() {
        let model = model_with(vec![
            person_class(false),
            Class::new("Trip", "Trippin", ClassKind::Entity),
        ]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[0];

        let output = EntityGenerator::new(&model, &config).generate(class).unwrap();
        assert!(output.contains(
            "public System.Collections.Generic.IList<ITrip> Trips { get; set; }"
        ));
    }

    #[test]
    fn test_media_entity_stream_and_internal_add() {
        let mut photo = Class::new("Photo", "Trippin", ClassKind::MediaEntity);
        photo.add_property(Property::new("Id", TypeRef::primitive("Int64")));
        photo.key = vec!["Id".to_string()];
        let model = model_with(vec![photo]);

        let mut config = GeneratorConfig::new();
        config.media_add_visibility = Visibility::Internal;
        let class = &model.namespaces[0].classes[0];

        let output = EntityGenerator::new(&model, &config).generate(class).unwrap();
        assert!(output.contains("public System.IO.Stream ContentStream { get; set; }"));
        assert!(output.contains(
            "internal System.Threading.Tasks.Task AddPhotoAsync(IPhoto item, bool deferSaveChanges = false) => InsertEntityAsync(item, deferSaveChanges);"
        ));
        // Non-public Add stays off the collection interface: the interface
        // form ends in a bare semicolon, the class form continues with a
        // delegating body.
        assert!(!output.contains("AddPhotoAsync(IPhoto item, bool deferSaveChanges = false);"));
    }

    #[test]
    fn test_upcast_rendering() {
        let base = Class::new("Person", "Trippin", ClassKind::Entity);
        let mut employee = person_class(false);
        employee.name = "Employee".to_string();
        employee.base_type = Some(FullName::new("Trippin", "Person"));
        let model = model_with(vec![
            base,
            employee,
            Class::new("Trip", "Trippin", ClassKind::Entity),
        ]);
        let config = GeneratorConfig::new();
        let class = &model.namespaces[0].classes[1];

        let output = EntityGenerator::new(&model, &config).generate(class).unwrap();
        assert!(output.contains("public partial interface IEmployee : IPerson"));
        assert!(output.contains(
            "public IPersonFetcher ToPerson() => CastTo<IPersonFetcher>(\"Trippin.Person\");"
        ));
    }
}
