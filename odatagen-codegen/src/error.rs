//! Error types for code generation and markup round-trips.

use thiserror::Error;

/// Error type for the canonical markup reader.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' in context '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Element found outside any schema.
    #[error("element '{element}' appears outside a Schema element")]
    OutsideSchema {
        /// Element name.
        element: String,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Structural model or configuration error.
    #[error("model error: {0}")]
    Model(#[from] odatagen_model::ModelError),

    /// Markup parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Primitive type name with no entry in the naming table.
    #[error("unknown primitive type '{name}' at {context}")]
    UnknownPrimitive {
        /// Semantic primitive name.
        name: String,
        /// Namespace.Class.Property locating the reference.
        context: String,
    },

    /// Class kind reaching a position no rule covers.
    #[error("unsupported class kind '{kind}' for class '{class}'")]
    UnsupportedClassKind {
        /// Qualified name of the offending class.
        class: String,
        /// Kind name.
        kind: String,
    },
}

impl CodegenError {
    /// Creates an unknown primitive error.
    pub fn unknown_primitive(name: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownPrimitive {
            name: name.into(),
            context: context.into(),
        }
    }

    /// Creates an unsupported class kind error.
    pub fn unsupported_kind(class: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedClassKind {
            class: class.into(),
            kind: kind.into(),
        }
    }
}
