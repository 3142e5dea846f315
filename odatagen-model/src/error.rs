//! Error types for model validation.

use thiserror::Error;

/// Error type for structural model and configuration validation.
///
/// Every variant carries the identifying context (namespace, class and
/// where applicable property name) needed to locate the offending model
/// element. All of these are fatal: generation is a single-shot transform
/// and never produces partial output.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Inheritance chain loops back onto itself.
    #[error("cyclic inheritance detected at class '{class}'")]
    CyclicInheritance {
        /// Qualified name of the class where the cycle closed.
        class: String,
    },

    /// Base type reference that resolves to nothing in the model.
    #[error("class '{class}' declares unknown base type '{base}'")]
    UnknownBaseType {
        /// Qualified name of the declaring class.
        class: String,
        /// Qualified name of the missing base.
        base: String,
    },

    /// Service container property that is not entity-typed.
    #[error(
        "service property '{property}' on '{namespace}.{class}' must reference an entity type"
    )]
    InvalidServiceProperty {
        /// Owning namespace.
        namespace: String,
        /// Owning service class.
        class: String,
        /// Offending property.
        property: String,
    },

    /// Property classified as navigation whose target is not Entity-kind.
    #[error(
        "navigation property '{property}' on '{namespace}.{class}' targets non-entity type '{target}'"
    )]
    BadNavigationTarget {
        /// Owning namespace.
        namespace: String,
        /// Owning class.
        class: String,
        /// Offending property.
        property: String,
        /// Qualified name of the resolved target.
        target: String,
    },

    /// Key entry naming a property the class does not declare.
    #[error("key property '{key}' is not declared on '{namespace}.{class}'")]
    MissingKeyProperty {
        /// Owning namespace.
        namespace: String,
        /// Owning class.
        class: String,
        /// Undeclared key name.
        key: String,
    },

    /// Rename override colliding with another class's resolved name.
    #[error(
        "rename of class '{class}' to '{renamed_to}' collides with another class in namespace '{namespace}'"
    )]
    RenameCollision {
        /// Namespace containing the collision.
        namespace: String,
        /// Class being renamed.
        class: String,
        /// Colliding resolved name.
        renamed_to: String,
    },
}

impl ModelError {
    /// Creates a cyclic inheritance error.
    pub fn cyclic(class: impl Into<String>) -> Self {
        Self::CyclicInheritance {
            class: class.into(),
        }
    }

    /// Creates an unknown base type error.
    pub fn unknown_base(class: impl Into<String>, base: impl Into<String>) -> Self {
        Self::UnknownBaseType {
            class: class.into(),
            base: base.into(),
        }
    }

    /// Creates an invalid service property error.
    pub fn invalid_service_property(
        namespace: impl Into<String>,
        class: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self::InvalidServiceProperty {
            namespace: namespace.into(),
            class: class.into(),
            property: property.into(),
        }
    }
}
