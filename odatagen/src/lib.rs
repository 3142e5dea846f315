//! # odatagen
//!
//! Strongly-typed client proxy generation for OData-style services.
//!
//! odatagen turns a schema-derived semantic model of a remote data service
//! (entities, complex types, enumerations, navigation relationships, a
//! service container) into C# client proxy source and into a canonical
//! schema-markup serialization used for round-trip regression testing.
//!
//! ## Quick Start
//!
//! ```
//! use odatagen::prelude::*;
//!
//! let mut person = Class::new("Person", "Trippin", ClassKind::Entity);
//! person.add_property(Property::new("UserName", TypeRef::primitive("String")));
//! person.key = vec!["UserName".to_string()];
//!
//! let mut ns = Namespace::new("Trippin");
//! ns.add_class(person);
//! let mut model = Model::new();
//! model.add_namespace(ns);
//!
//! let source = generate_source(&model, &GeneratorConfig::new()).unwrap();
//! assert!(source.contains("public partial class Person"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`model`] - Semantic service model, configuration, validation
//! - [`codegen`] - Naming, capability rules, method synthesis, writers

pub mod prelude;

/// Semantic service model and configuration.
pub mod model {
    pub use odatagen_model::*;
}

/// Code generation from semantic models.
pub mod codegen {
    pub use odatagen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use odatagen_codegen::{generate_edmx, generate_source, parse_edmx, CodegenError};
pub use odatagen_model::{GeneratorConfig, Model, ModelError};
