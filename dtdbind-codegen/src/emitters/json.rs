//! JSON dump of the compiled schema, for inspecting what the compiler decided

use crate::compiler::Schema;
use crate::emitter::Emitter;
use crate::error::CodegenError;

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Compiled schema as JSON"
    }

    fn file_extension(&self) -> &str {
        "json"
    }

    fn emit(&self, schema: &Schema) -> Result<String, CodegenError> {
        let mut output = serde_json::to_string_pretty(schema)?;
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile, CompileOptions};
    use dtdbind_parser::parse_str;

    #[test]
    fn test_shape_is_tagged() {
        let schema = compile(
            &parse_str("<!ELEMENT note ANY>\n<!ELEMENT title (#PCDATA)>"),
            &CompileOptions::default(),
        );
        let output = JsonEmitter.emit(&schema).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(value["package"], "main");
        assert_eq!(value["definitions"][0]["shape"]["kind"], "raw-content");
        assert_eq!(value["definitions"][0]["shape"]["content_field"], "Content");
        assert_eq!(value["definitions"][1]["shape"]["kind"], "simple");
    }
}
