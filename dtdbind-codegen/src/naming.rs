//! Identifier naming for generated bindings
//!
//! XML names may contain `-`, `_`, `.` and `:`, none of which survive as identifier
//! separators. Names are split on those characters and every word gets an uppercase first
//! letter; the rest of the word is kept as written, so `agentRefs` stays `AgentRefs`.
//!
//! A name that leaves nothing behind falls back to `Element` (types) or `Field` (fields). A
//! name starting with a digit keeps that fallback as a prefix.

use std::collections::HashSet;

const SEPARATORS: [char; 4] = ['-', '_', '.', ':'];

const TYPE_FALLBACK: &str = "Element";
const FIELD_FALLBACK: &str = "Field";

/// Words that cannot be used as plain Rust identifiers
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that are not allowed as raw identifiers either
const RUST_RESERVED: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Type name for an element, e.g. `book-title` → `BookTitle`
pub fn type_name(xml_name: &str) -> String {
    pascal_case(xml_name, TYPE_FALLBACK)
}

/// Field name for an attribute or child element, e.g. `xml:lang` → `XmlLang`
pub fn field_name(xml_name: &str) -> String {
    pascal_case(xml_name, FIELD_FALLBACK)
}

fn pascal_case(xml_name: &str, fallback: &str) -> String {
    let mut result = String::new();
    for word in xml_name.split(SEPARATORS).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    match result.chars().next() {
        None => fallback.to_string(),
        Some(first) if !first.is_alphabetic() => format!("{}{}", fallback, result),
        Some(_) => result,
    }
}

/// Lowercase words joined by `_`. Word boundaries are case changes, separators and the end
/// of an acronym: `XMLName` → `xml_name`, `AgentRefs2` → `agent_refs2`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if SEPARATORS.contains(&c) {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_uppercase() && i > 0 && !result.is_empty() && !result.ends_with('_') {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    let result = result.trim_end_matches('_').to_string();
    match result.chars().next() {
        None => FIELD_FALLBACK.to_lowercase(),
        Some(first) if !first.is_alphabetic() => format!("{}_{}", FIELD_FALLBACK.to_lowercase(), result),
        Some(_) => result,
    }
}

/// Make a snake_case name usable as a Rust identifier: keywords become raw identifiers
pub fn rust_identifier(name: &str) -> String {
    if RUST_RESERVED.contains(&name) {
        format!("{}_", name)
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Hands out names that are unique within one scope.
///
/// The first request for a name gets it unchanged; later requests get a numeric suffix
/// starting at 2 (`Title`, `Title2`, `Title3`).
#[derive(Debug, Default, Clone)]
pub struct UniqueNames {
    used: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a name as taken without handing it out
    pub fn reserve(&mut self, name: &str) {
        self.used.insert(name.to_string());
    }

    pub fn allocate(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut suffix = 2;
        loop {
            let candidate = format!("{}{}", base, suffix);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }
}
