//! Built-in emitters

pub mod go;
pub mod json;
pub mod rust;

pub use go::GoEmitter;
pub use json::JsonEmitter;
pub use rust::RustEmitter;
