//! Enumeration source generation.

use odatagen_model::EnumType;

/// Generator for enumeration declarations.
pub struct EnumGenerator;

impl EnumGenerator {
    /// Generates one enum declaration, members in declaration order.
    /// Underlying values are not modeled, so members rely on implicit
    /// ordering.
    #[must_use]
    pub fn generate(enum_type: &EnumType) -> String {
        let mut output = String::new();

        output.push_str(&format!("    public enum {}\n    {{\n", enum_type.name));
        for member in &enum_type.members {
            output.push_str(&format!("        {},\n", member.name));
        }
        output.push_str("    }\n");

        output
    }
}
