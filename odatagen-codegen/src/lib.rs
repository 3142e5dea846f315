//! # odatagen Codegen
//!
//! Client proxy code generation from semantic service models.
//!
//! This crate provides:
//! - Naming resolution and primitive type mapping
//! - Capability rules and method synthesis per class kind
//! - C# proxy source generation
//! - Canonical schema-markup writer and round-trip reader
//!
//! Generation is a pure, single-shot transform: identical model and
//! configuration always produce byte-identical output, and any failure
//! aborts the run with no partial output.

pub mod csharp;
pub mod edmx;
pub mod error;
pub mod methods;
pub mod names;
pub mod typemap;

pub use csharp::SourceGenerator;
pub use edmx::{parse_edmx, to_edmx};
pub use error::{CodegenError, ParseError};
pub use methods::{ContainerElement, Method, MethodKind, Parameter, ReturnType};
pub use typemap::TypePosition;

use odatagen_model::{GeneratorConfig, Model};
use tracing::debug;

/// Generates C# proxy source for a model.
///
/// Validates the model and configuration first so that a conflicting input
/// never produces partial output.
///
/// # Errors
/// Returns `CodegenError` if validation or generation fails.
pub fn generate_source(model: &Model, config: &GeneratorConfig) -> Result<String, CodegenError> {
    odatagen_model::validate_model(model)?;
    odatagen_model::validate_config(model, config)?;

    debug!(namespaces = model.namespaces.len(), "generating proxy source");
    SourceGenerator::new(model, config).generate()
}

/// Generates the canonical markup serialization for a model.
///
/// # Arguments
/// * `model` - The semantic model to serialize
/// * `envelope` - Whether to wrap the document in the outer envelope
///
/// # Errors
/// Returns `CodegenError` if validation or emission fails.
pub fn generate_edmx(model: &Model, envelope: bool) -> Result<String, CodegenError> {
    odatagen_model::validate_model(model)?;

    debug!(namespaces = model.namespaces.len(), envelope, "generating markup");
    edmx::to_edmx(model, envelope)
}
