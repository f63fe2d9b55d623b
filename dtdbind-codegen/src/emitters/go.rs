//! Go structs tagged for `encoding/xml`
//!
//! One struct per record, fields in this order: the `XMLName` identity, attributes, child
//! elements, then the `,chardata` text field. Singular children are pointers so that absence
//! survives a round trip; repeated children are slices. Attributes are plain strings (or
//! string slices for list types) with `,omitempty` unless required.

use crate::compiler::{
    AttributeField, Cardinality, ChildField, ChildKind, Definition, ElementShape, Schema,
    IDENTITY_FIELD,
};
use crate::emitter::Emitter;
use crate::error::CodegenError;

pub struct GoEmitter {
    doc_comments: bool,
}

impl GoEmitter {
    pub fn new() -> Self {
        GoEmitter { doc_comments: true }
    }

    /// Whether each struct is preceded by a `// X represents the <x> element` comment
    pub fn with_doc_comments(mut self, doc_comments: bool) -> Self {
        self.doc_comments = doc_comments;
        self
    }
}

impl Default for GoEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for GoEmitter {
    fn name(&self) -> &str {
        "go"
    }

    fn description(&self) -> &str {
        "Go structs for encoding/xml"
    }

    fn file_extension(&self) -> &str {
        "go"
    }

    fn emit(&self, schema: &Schema) -> Result<String, CodegenError> {
        let mut output = String::new();
        output.push_str(&format!("package {}\n\n", schema.package));
        output.push_str("import \"encoding/xml\"\n");

        for definition in schema.records() {
            output.push('\n');
            output.push_str(&self.record(definition));
        }

        Ok(output)
    }
}

impl GoEmitter {
    fn record(&self, definition: &Definition) -> String {
        let mut out = String::new();
        let name = &definition.type_name;

        if self.doc_comments {
            out.push_str(&format!(
                "// {} represents the <{}> element\n",
                name, definition.element
            ));
        }
        out.push_str(&format!("type {} struct {{\n", name));
        out.push_str(&format!(
            "\t{} xml.Name `xml:\"{}\"`\n",
            IDENTITY_FIELD, definition.element
        ));

        for attribute in definition.shape.attributes() {
            out.push_str(&format!("\t{}\n", attribute_field(attribute)));
        }

        match &definition.shape {
            ElementShape::RawContent { content_field, .. } => {
                out.push_str(&format!("\t{} string `xml:\",innerxml\"`\n", content_field));
            }
            ElementShape::Structured {
                children,
                text_field,
                ..
            } => {
                for child in children {
                    out.push_str(&format!("\t{}\n", child_field(child)));
                }
                if let Some(text) = text_field {
                    out.push_str(&format!("\t{} string `xml:\",chardata\"`\n", text));
                }
            }
            ElementShape::Simple | ElementShape::Empty { .. } => {}
        }

        out.push_str("}\n");
        out
    }
}

fn attribute_field(attribute: &AttributeField) -> String {
    let go_type = if attribute.multi_valued {
        "[]string"
    } else {
        "string"
    };
    let omitempty = if attribute.required { "" } else { ",omitempty" };
    format!(
        "{} {} `xml:\"{},attr{}\"`",
        attribute.field_name, go_type, attribute.xml_name, omitempty
    )
}

fn child_field(child: &ChildField) -> String {
    let element_type = match &child.kind {
        ChildKind::Text => "string",
        ChildKind::Record(type_name) => type_name.as_str(),
    };
    let go_type = match child.cardinality {
        Cardinality::Optional => format!("*{}", element_type),
        Cardinality::Repeated => format!("[]{}", element_type),
    };
    format!(
        "{} {} `xml:\"{},omitempty\"`",
        child.field_name, go_type, child.xml_name
    )
}
