//! Emitter registry for target discovery and selection
//!
//! This module provides a centralized registry for all available emitters.
//! Emitters are registered and retrieved by target name.

use crate::compiler::Schema;
use crate::emitter::Emitter;
use crate::emitters::{GoEmitter, JsonEmitter, RustEmitter};
use crate::error::CodegenError;
use std::collections::HashMap;

/// Registry of code emitters
///
/// # Examples
///
/// ```ignore
/// let mut registry = EmitterRegistry::new();
/// registry.register(MyEmitter);
///
/// let code = registry.emit(&schema, "my-target")?;
/// ```
pub struct EmitterRegistry {
    emitters: HashMap<String, Box<dyn Emitter>>,
}

impl EmitterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        EmitterRegistry {
            emitters: HashMap::new(),
        }
    }

    /// Register an emitter
    ///
    /// If an emitter with the same name already exists, it will be replaced.
    pub fn register<E: Emitter + 'static>(&mut self, emitter: E) {
        self.emitters
            .insert(emitter.name().to_string(), Box::new(emitter));
    }

    /// Get an emitter by target name
    pub fn get(&self, name: &str) -> Result<&dyn Emitter, CodegenError> {
        self.emitters
            .get(name)
            .map(|e| e.as_ref())
            .ok_or_else(|| CodegenError::EmitterNotFound(name.to_string()))
    }

    /// Check if a target exists
    pub fn has(&self, name: &str) -> bool {
        self.emitters.contains_key(name)
    }

    /// List all available target names (sorted)
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.emitters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Render a schema with the named target
    pub fn emit(&self, schema: &Schema, target: &str) -> Result<String, CodegenError> {
        self.get(target)?.emit(schema)
    }

    /// Create a registry with the built-in targets
    pub fn with_defaults() -> Self {
        Self::with_doc_comments(true)
    }

    /// Built-in targets, with or without documentation comments in the generated code
    pub fn with_doc_comments(doc_comments: bool) -> Self {
        let mut registry = Self::new();

        registry.register(RustEmitter::new().with_doc_comments(doc_comments));
        registry.register(GoEmitter::new().with_doc_comments(doc_comments));
        registry.register(JsonEmitter);

        registry
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
