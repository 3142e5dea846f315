//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```
//! use odatagen::prelude::*;
//! ```

// Model types
pub use odatagen_model::{
    Class, ClassKind, EnumMember, EnumType, FullName, GeneratorConfig, Model, ModelError,
    Namespace, Property, TypeAlias, TypeRef, Visibility,
};
pub use odatagen_model::{validate_config, validate_model};

// Codegen types
pub use odatagen_codegen::{
    generate_edmx, generate_source, parse_edmx, CodegenError, ContainerElement, Method,
    MethodKind, Parameter, ParseError, ReturnType, SourceGenerator, TypePosition,
};
