//! DTD grammar parsing
//!
//!     The parser works in three passes over each physical line of input:
//!
//!     1. Reassembly: comments are stripped and lines are accumulated until a complete
//!        declaration has been seen (see [reassembly]).
//!     2. Recognition: each `<!…>` declaration is classified by its keyword and its header
//!        fields are extracted (see [declarations]).
//!     3. Recording: the [DtdParser] context updates its entity table, element map and
//!        declaration order. Attribute lists are expanded by [attributes].
//!
//!     The result is a [ParseResult], an immutable snapshot owned by the caller.

pub mod attributes;
pub mod declarations;
pub mod error;
pub mod model;
pub mod parser;
pub mod reassembly;

pub use error::ParseError;
pub use model::{AttributeDecl, AttributeDefault, AttributeType, ElementDecl, ParseResult};
pub use parser::DtdParser;

use std::path::Path;

/// Parse DTD source text held in memory.
pub fn parse_str(source: &str) -> ParseResult {
    DtdParser::new().parse_str(source)
}

/// Open and parse a DTD file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult, ParseError> {
    DtdParser::new().parse_file(path)
}
