//! Complex type source generation.
//!
//! Complex types are value shapes: an interface plus a concrete class with
//! data accessors, no identity and no query or CRUD surface.

use crate::error::CodegenError;
use crate::names;
use crate::typemap::{self, TypePosition};
use odatagen_model::{Class, GeneratorConfig, Model};

/// Generator for complex type declarations.
pub struct ComplexGenerator<'a> {
    model: &'a Model,
    config: &'a GeneratorConfig,
}

impl<'a> ComplexGenerator<'a> {
    /// Creates a new complex type generator.
    #[must_use]
    pub fn new(model: &'a Model, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Generates the interface and concrete class for one complex type.
    ///
    /// # Errors
    /// Returns `UnknownPrimitive` for an unmapped property type.
    pub fn generate(&self, class: &Class) -> Result<String, CodegenError> {
        let interface = names::concrete_interface_name(class, self.config);
        let concrete = names::concrete_type_name(class, self.config);
        let mut output = String::new();

        output.push_str(&format!("    public partial interface {interface}\n    {{\n"));
        output.push_str(&self.data_properties(class, true)?);
        output.push_str("    }\n");

        let base = match &class.base_type {
            Some(full) => format!(
                "{}, ",
                names::named_type_name(&full.namespace, &full.name, self.config)
            ),
            None => String::new(),
        };
        output.push_str(&format!(
            "    public partial class {concrete} : {base}{interface}\n    {{\n"
        ));
        output.push_str(&self.data_properties(class, false)?);
        if class.is_open {
            output.push_str(
                "        public System.Collections.Generic.IDictionary<string, object> AdditionalData { get; set; }\n",
            );
        }
        output.push_str("    }\n");

        Ok(output)
    }

    /// Emits one auto-property per declared property, in declaration
    /// order. Interface members carry no access modifier.
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
}
