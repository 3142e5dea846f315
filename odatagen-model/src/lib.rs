//! # odatagen Model
//!
//! Semantic service model and generator configuration.
//!
//! This crate provides:
//! - Typed model of a remote data service: namespaces, classes, properties,
//!   enumerations, type aliases
//! - Generator configuration as an explicit, immutable value
//! - Structural validation (inheritance, keys, service containers, rename
//!   overrides)
//!
//! The model is produced by an external metadata reader, handed to the
//! generator fully built, and never mutated during a generation run.

pub mod config;
pub mod error;
pub mod model;
pub mod validation;

pub use config::GeneratorConfig;
pub use error::ModelError;
pub use model::{
    Class, ClassKind, EnumMember, EnumType, FullName, Model, Namespace, Property, TypeAlias,
    TypeRef, Visibility,
};
pub use validation::{validate_config, validate_model};
