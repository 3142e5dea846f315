//! Canonical schema-markup serialization.
//!
//! The markup target exists for round-trip regression verification: the
//! writer serializes a model to a canonical EDMX-style document, the reader
//! reconstructs a model from writer output, and tests assert the two are
//! equal. It is not a general-purpose schema serializer.

pub mod reader;
pub mod writer;

pub use reader::parse_edmx;
pub use writer::to_edmx;
