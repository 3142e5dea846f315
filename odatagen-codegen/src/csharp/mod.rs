//! C# proxy source generation modules.

pub mod complex;
pub mod container;
pub mod entities;
pub mod enums;

pub use complex::ComplexGenerator;
pub use container::ContainerGenerator;
pub use entities::EntityGenerator;
pub use enums::EnumGenerator;

use crate::error::CodegenError;
use crate::names;
use odatagen_model::{ClassKind, GeneratorConfig, Model};

/// Generator for complete proxy source, one namespace block per model
/// namespace, in declaration order.
pub struct SourceGenerator<'a> {
    model: &'a Model,
    config: &'a GeneratorConfig,
}

impl<'a> SourceGenerator<'a> {
    /// Creates a new source generator.
    #[must_use]
    pub fn new(model: &'a Model, config: &'a GeneratorConfig) -> Self {
        Self { model, config }
    }

    /// Generates source for the whole model.
    ///
    /// # Errors
    /// Propagates the first naming, mapping or classification error; no
    /// partial output is produced on failure.
    pub fn generate(&self) -> Result<String, CodegenError> {
        let mut output = String::new();

        for namespace in &self.model.namespaces {
            let proxy_ns = names::proxy_namespace(&namespace.name, self.config);
            output.push_str(&format!("namespace {proxy_ns}\n{{\n"));

            for class in &namespace.classes {
                match class.kind {
                    ClassKind::Complex => {
                        output.push_str(
                            &ComplexGenerator::new(self.model, self.config).generate(class)?,
                        );
                    }
                    ClassKind::Entity | ClassKind::MediaEntity => {
                        output.push_str(
                            &EntityGenerator::new(self.model, self.config).generate(class)?,
                        );
                    }
                    ClassKind::Service => {
                        output.push_str(
                            &ContainerGenerator::new(self.model, self.config).generate(class)?,
                        );
                    }
                }
            }

            for enum_type in &namespace.enums {
                output.push_str(&EnumGenerator::generate(enum_type));
            }

            output.push_str("}\n");
        }

        Ok(output)
    }
}
