//! Rust structs for serde with quick-xml naming conventions
//!
//!     Every record becomes a struct deriving `Serialize` and `Deserialize`, wrapped in a
//!     `pub mod` named after the package. quick-xml maps serde names as follows:
//!
//!     - `@name` for attributes,
//!     - plain element names for children,
//!     - `$text` for character data,
//!     - `$value` for the content of `ANY` elements.
//!
//!     Optional values use `Option` and collections use `Vec`, both skipped when empty so that
//!     absent elements stay absent.
//!
//! Recursive types
//!
//!     A struct cannot contain itself by value. A singular child whose type can reach the
//!     enclosing struct again through other singular children is boxed: `Option<Box<T>>`.
//!     `Vec` already provides the indirection for repeated children.
//!
//! Type names
//!
//!     Record names that would shadow a prelude type or a derive used by the generated code
//!     (`Option`, `String`, `Serialize`, ...) get a numeric suffix, as any other collision.

use crate::compiler::{
    AttributeField, Cardinality, ChildField, ChildKind, Definition, ElementShape, Schema,
};
use crate::emitter::Emitter;
use crate::error::CodegenError;
use crate::naming::{self, UniqueNames};
use std::collections::{HashMap, HashSet};

const INDENT: &str = "    ";
const FIELD_INDENT: &str = "        ";

/// Names the generated module refers to unqualified
const RESERVED_TYPE_NAMES: &[&str] = &[
    "Option",
    "Some",
    "None",
    "String",
    "Vec",
    "Box",
    "Default",
    "Debug",
    "Clone",
    "PartialEq",
    "Serialize",
    "Deserialize",
];

pub struct RustEmitter {
    doc_comments: bool,
}

impl RustEmitter {
    pub fn new() -> Self {
        RustEmitter { doc_comments: true }
    }

    /// Whether structs and defaulted attributes carry `///` documentation
    pub fn with_doc_comments(mut self, doc_comments: bool) -> Self {
        self.doc_comments = doc_comments;
        self
    }
}

impl Default for RustEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for RustEmitter {
    fn name(&self) -> &str {
        "rust"
    }

    fn description(&self) -> &str {
        "Rust structs for serde and quick-xml"
    }

    fn file_extension(&self) -> &str {
        "rs"
    }

    fn emit(&self, schema: &Schema) -> Result<String, CodegenError> {
        let graph = SingularGraph::new(schema);
        let names = type_names(schema);
        let module = naming::rust_identifier(&naming::to_snake_case(&schema.package));

        let mut output = String::new();
        output.push_str(&format!("pub mod {} {{\n", module));
        output.push_str(&format!("{}use serde::{{Deserialize, Serialize}};\n", INDENT));

        for definition in schema.records() {
            output.push('\n');
            self.record(definition, &graph, &names, &mut output);
        }

        output.push_str("}\n");
        Ok(output)
    }
}

impl RustEmitter {
    fn record(
        &self,
        definition: &Definition,
        graph: &SingularGraph,
        names: &HashMap<&str, String>,
        out: &mut String,
    ) {
        let type_name = rust_type(&definition.type_name, names);
        if self.doc_comments {
            out.push_str(&format!("{}/// `<{}>` element\n", INDENT, definition.element));
        }
        out.push_str(&format!(
            "{}#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]\n",
            INDENT
        ));
        out.push_str(&format!(
            "{}#[serde(rename = \"{}\")]\n",
            INDENT, definition.element
        ));

        let mut fields = Vec::new();
        let mut idents = UniqueNames::new();

        for attribute in definition.shape.attributes() {
            fields.push(self.attribute_field(attribute, &mut idents));
        }

        match &definition.shape {
            ElementShape::RawContent { content_field, .. } => {
                fields.push(plain_field(content_field, "$value", &mut idents));
            }
            ElementShape::Structured {
                children,
                text_field,
                ..
            } => {
                for child in children {
                    let boxed = match &child.kind {
                        ChildKind::Record(target) => {
                            child.cardinality == Cardinality::Optional
                                && graph.reaches(target, &definition.type_name)
                        }
                        ChildKind::Text => false,
                    };
                    fields.push(child_field(child, boxed, names, &mut idents));
                }
                if let Some(text) = text_field {
                    fields.push(plain_field(text, "$text", &mut idents));
                }
            }
            ElementShape::Simple | ElementShape::Empty { .. } => {}
        }

        if fields.is_empty() {
            out.push_str(&format!("{}pub struct {} {{}}\n", INDENT, type_name));
            return;
        }

        out.push_str(&format!("{}pub struct {} {{\n", INDENT, type_name));
        for line in fields {
            out.push_str(&line);
        }
        out.push_str(&format!("{}}}\n", INDENT));
    }

    fn attribute_field(&self, attribute: &AttributeField, idents: &mut UniqueNames) -> String {
        let mut out = String::new();

        if self.doc_comments {
            if let Some(value) = &attribute.default_value {
                let note = if attribute.fixed { "Fixed to" } else { "Defaults to" };
                out.push_str(&format!("{}/// {} `{}`\n", FIELD_INDENT, note, value));
            }
        }

        let rename = format!("@{}", attribute.xml_name);
        let (attrs, field_type) = match (attribute.required, attribute.multi_valued) {
            (true, false) => (rename_only(&rename), "String"),
            (true, true) => (rename_only(&rename), "Vec<String>"),
            (false, false) => (skip_when(&rename, "Option::is_none"), "Option<String>"),
            (false, true) => (skip_when(&rename, "Vec::is_empty"), "Vec<String>"),
        };

        out.push_str(&field(&attrs, &ident(&attribute.field_name, idents), field_type));
        out
    }
}

fn child_field(
    child: &ChildField,
    boxed: bool,
    names: &HashMap<&str, String>,
    idents: &mut UniqueNames,
) -> String {
    let element_type = match &child.kind {
        ChildKind::Text => "String".to_string(),
        ChildKind::Record(type_name) if boxed => format!("Box<{}>", rust_type(type_name, names)),
        ChildKind::Record(type_name) => rust_type(type_name, names).to_string(),
    };

    let (attrs, field_type) = match child.cardinality {
        Cardinality::Optional => (
            skip_when(&child.xml_name, "Option::is_none"),
            format!("Option<{}>", element_type),
        ),
        Cardinality::Repeated => (
            skip_when(&child.xml_name, "Vec::is_empty"),
            format!("Vec<{}>", element_type),
        ),
    };

    field(&attrs, &ident(&child.field_name, idents), &field_type)
}

fn plain_field(field_name: &str, rename: &str, idents: &mut UniqueNames) -> String {
    let attrs = format!("#[serde(rename = \"{}\", default)]", rename);
    field(&attrs, &ident(field_name, idents), "String")
}

fn field(attrs: &str, ident: &str, field_type: &str) -> String {
    format!(
        "{indent}{attrs}\n{indent}pub {ident}: {field_type},\n",
        indent = FIELD_INDENT
    )
}

fn ident(field_name: &str, idents: &mut UniqueNames) -> String {
    naming::rust_identifier(&idents.allocate(&naming::to_snake_case(field_name)))
}

/// Rust names for the schema's record types, keyed by schema type name
fn type_names(schema: &Schema) -> HashMap<&str, String> {
    let is_reserved = |name: &str| RESERVED_TYPE_NAMES.contains(&name);

    let mut allocated = UniqueNames::new();
    for reserved in RESERVED_TYPE_NAMES {
        allocated.reserve(reserved);
    }
    // Schema names are already unique, so only the reserved ones move
    for definition in schema.records() {
        if !is_reserved(definition.type_name.as_str()) {
            allocated.reserve(&definition.type_name);
        }
    }

    schema
        .records()
        .map(|definition| {
            let name = if is_reserved(definition.type_name.as_str()) {
                allocated.allocate(&definition.type_name)
            } else {
                definition.type_name.clone()
            };
            (definition.type_name.as_str(), name)
        })
        .collect()
}

fn rust_type<'n>(type_name: &'n str, names: &'n HashMap<&str, String>) -> &'n str {
    names.get(type_name).map_or(type_name, String::as_str)
}

fn rename_only(rename: &str) -> String {
    format!("#[serde(rename = \"{}\")]", rename)
}

fn skip_when(rename: &str, predicate: &str) -> String {
    format!(
        "#[serde(rename = \"{}\", default, skip_serializing_if = \"{}\")]",
        rename, predicate
    )
}

/// Record types linked by singular (`Option`) child fields
struct SingularGraph<'a> {
    edges: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> SingularGraph<'a> {
    fn new(schema: &'a Schema) -> Self {
        let edges = schema
            .records()
            .map(|definition| {
                let targets: Vec<&str> = definition
                    .shape
                    .children()
                    .iter()
                    .filter(|c| c.cardinality == Cardinality::Optional)
                    .filter_map(|c| match &c.kind {
                        ChildKind::Record(target) => Some(target.as_str()),
                        ChildKind::Text => None,
                    })
                    .collect();
                (definition.type_name.as_str(), targets)
            })
            .collect();

        SingularGraph { edges }
    }

    /// Whether `to` is reachable from `from`, counting `from == to`
    fn reaches(&self, from: &str, to: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut pending = vec![from];

        while let Some(current) = pending.pop() {
            if current == to {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(targets) = self.edges.get(current) {
                pending.extend(targets.iter().copied());
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, CompileOptions};
    use dtdbind_parser::parse_str;

    fn emit(source: &str) -> String {
        let schema = compile(&parse_str(source), &CompileOptions::default());
        RustEmitter::new().emit(&schema).expect("emits")
    }

    #[test]
    fn test_self_reference_is_boxed() {
        let output = emit(
            r#"
<!ELEMENT section (title, section?)>
<!ELEMENT title (#PCDATA)>
"#,
        );
        assert!(output.contains("pub section: Option<Box<Section>>,"));
    }

    #[test]
    fn test_mutual_recursion_is_boxed_on_both_sides() {
        let output = emit(
            r#"
<!ELEMENT a (b?)>
<!ATTLIST a id ID #IMPLIED>
<!ELEMENT b (a?)>
<!ATTLIST b id ID #IMPLIED>
"#,
        );
        assert!(output.contains("pub b: Option<Box<B>>,"));
        assert!(output.contains("pub a: Option<Box<A>>,"));
    }

    #[test]
    fn test_repeated_recursion_is_not_boxed() {
        let output = emit("<!ELEMENT node (node*)>");
        assert!(output.contains("pub node: Vec<Node>,"));
    }

    #[test]
    fn test_keyword_fields_become_raw_identifiers() {
        let output = emit(
            r#"
<!ELEMENT link EMPTY>
<!ATTLIST link type CDATA #REQUIRED>
"#,
        );
        assert!(output.contains("pub r#type: String,"));
    }

    #[test]
    fn test_simple_children_are_strings() {
        let output = emit(
            r#"
<!ELEMENT hr EMPTY>
<!ELEMENT page (hr)>
"#,
        );
        assert!(output.contains("pub hr: Option<String>,"));
        assert!(!output.contains("pub struct Hr"));
    }

    #[test]
    fn test_reserved_type_names_skip_existing_suffixes() {
        let output = emit(
            r#"
<!ELEMENT option (option2?)>
<!ATTLIST option value CDATA #IMPLIED>
<!ELEMENT option2 EMPTY>
<!ATTLIST option2 value CDATA #IMPLIED>
"#,
        );
        assert!(output.contains("pub struct Option3 {"));
        assert!(output.contains("pub struct Option2 {"));
        assert!(output.contains("pub option2: Option<Option2>,"));
        assert!(!output.contains("pub struct Option {"));
    }

    #[test]
    fn test_package_becomes_module_identifier() {
        let schema = compile(
            &parse_str("<!ELEMENT note ANY>"),
            &CompileOptions {
                package: "my-bindings".to_string(),
                ..CompileOptions::default()
            },
        );
        let output = RustEmitter::new().emit(&schema).expect("emits");
        assert!(output.starts_with("pub mod my_bindings {\n"));
    }
}
