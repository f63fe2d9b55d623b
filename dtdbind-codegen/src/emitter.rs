//! Emitter trait definition
//!
//! An emitter renders a compiled [Schema] as source text for one target language.

use crate::compiler::Schema;
use crate::error::CodegenError;

/// Trait for code emitters
///
/// # Examples
///
/// ```ignore
/// struct MyEmitter;
///
/// impl Emitter for MyEmitter {
///     fn name(&self) -> &str {
///         "my-target"
///     }
///
///     fn file_extension(&self) -> &str {
///         "txt"
///     }
///
///     fn emit(&self, schema: &Schema) -> Result<String, CodegenError> {
///         Ok(format!("{} definitions", schema.definitions.len()))
///     }
/// }
/// ```
pub trait Emitter: Send + Sync {
    /// The name of this target (e.g., "rust", "go", "json")
    fn name(&self) -> &str;

    /// Optional description of this target
    fn description(&self) -> &str {
        ""
    }

    /// Extension of the files this target produces, without the dot
    fn file_extension(&self) -> &str;

    /// Render the schema
    fn emit(&self, schema: &Schema) -> Result<String, CodegenError>;
}
