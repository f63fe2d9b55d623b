//! # dtdbind-parser
//!
//! Extracts element, attribute-list and parameter-entity declarations from DTD text.
//!
//! File Layout
//!
//! src/dtd
//!   ├── reassembly     Physical lines → complete `<!…>` declarations
//!   ├── declarations   Declaration header recognition (ENTITY / ELEMENT / ATTLIST)
//!   ├── attributes     Attribute-definition walker with parameter-entity substitution
//!   ├── model          ParseResult and the declaration types it carries
//!   ├── parser         DtdParser, the context value that ties the above together
//!   └── error          Fatal errors (I/O only)
//!
//! Parsing is best effort: declarations that don't match the expected shape are dropped
//! and reported through `tracing` at debug level. Only failing to open or read the input
//! is an error.

pub mod dtd;

pub use dtd::{
    parse_file, parse_str, AttributeDecl, AttributeDefault, AttributeType, DtdParser,
    ElementDecl, ParseError, ParseResult,
};
