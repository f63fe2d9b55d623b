//! Attribute-list parsing
//!
//! The body of an `<!ATTLIST element …>` declaration is a run of definitions, each made of a
//! name, a type and a default spec:
//!
//!     id      ID                #REQUIRED
//!     status  ( open | closed ) "open"
//!     version CDATA             #FIXED "1.0"
//!     %common;
//!
//! The body is split on whitespace (quoted literals stay whole) and walked left to right.
//! Enumerated types span tokens, so the walker tracks parenthesis depth until the group
//! closes. A `%name;` token is replaced by the definitions found in that parameter entity's
//! value. Substitution is single level: references inside an entity value are skipped.
//!
//! Definitions that run out of tokens are dropped; nothing here fails.

use crate::dtd::model::{AttributeDecl, AttributeDefault, AttributeType};
use std::collections::HashMap;
use tracing::debug;

/// Parse an attribute-list body, expanding parameter entities from `entities`.
pub fn parse_attribute_list(body: &str, entities: &HashMap<String, String>) -> Vec<AttributeDecl> {
    let tokens = tokenize(body);
    walk_definitions(&tokens, Some(entities))
}

/// Split on whitespace, keeping `"…"` and `'…'` literals as single tokens.
pub fn tokenize(body: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = body.trim_start();

    while let Some(first) = rest.chars().next() {
        let end = if first == '"' || first == '\'' {
            rest[1..]
                .find(first)
                .map(|close| close + 2)
                .unwrap_or(rest.len())
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };

        tokens.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    tokens
}

fn walk_definitions(tokens: &[&str], entities: Option<&HashMap<String, String>>) -> Vec<AttributeDecl> {
    let mut attributes = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        if let Some(entity) = parameter_entity_reference(tokens[index]) {
            match entities.and_then(|table| table.get(entity)) {
                Some(value) => {
                    let expanded = tokenize(value);
                    attributes.extend(walk_definitions(&expanded, None));
                }
                None => debug!(entity, "skipping unresolved parameter entity reference"),
            }
            index += 1;
            continue;
        }

        let (attribute, next) = parse_definition(tokens, index);
        if let Some(attribute) = attribute {
            attributes.push(attribute);
        }
        index = next;
    }

    attributes
}

/// Parse the definition starting at `start`, returning it (if complete) and the index of the
/// first token after it.
fn parse_definition(tokens: &[&str], start: usize) -> (Option<AttributeDecl>, usize) {
    if start + 2 >= tokens.len() {
        return (None, start + 1);
    }

    let name = tokens[start];
    let type_token = tokens[start + 1];

    let (declared_type, type_end) = if type_token.contains('(') {
        match enumeration_end(tokens, start + 1) {
            Some(end) => (AttributeType::Enumerated, end),
            None => return (None, tokens.len()),
        }
    } else if type_token.eq_ignore_ascii_case("NOTATION") && tokens[start + 2].starts_with('(') {
        match enumeration_end(tokens, start + 2) {
            Some(end) => (AttributeType::Enumerated, end),
            None => return (None, tokens.len()),
        }
    } else {
        (AttributeType::from_keyword(type_token), start + 1)
    };

    let default_index = type_end + 1;
    let Some(default_token) = tokens.get(default_index) else {
        debug!(attribute = name, "dropping attribute without a default spec");
        return (None, tokens.len());
    };

    let (default, next) = match *default_token {
        "#REQUIRED" => (AttributeDefault::Required, default_index + 1),
        "#IMPLIED" => (AttributeDefault::Implied, default_index + 1),
        "#FIXED" => match tokens.get(default_index + 1) {
            Some(value) => (AttributeDefault::Fixed(unquote(value)), default_index + 2),
            None => {
                debug!(attribute = name, "dropping #FIXED attribute without a value");
                return (None, tokens.len());
            }
        },
        literal => (AttributeDefault::Value(unquote(literal)), default_index + 1),
    };

    (Some(AttributeDecl::new(name, declared_type, default)), next)
}

/// Index of the token that closes the parenthesised group opened at `start`.
fn enumeration_end(tokens: &[&str], start: usize) -> Option<usize> {
    let mut depth = 0i32;

    for (index, token) in tokens.iter().enumerate().skip(start) {
        for ch in token.chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
        }
        if depth <= 0 && token.contains(')') {
            return Some(index);
        }
    }

    None
}

fn parameter_entity_reference(token: &str) -> Option<&str> {
    token
        .strip_prefix('%')
        .and_then(|rest| rest.strip_suffix(';'))
        .filter(|name| !name.is_empty())
}

fn unquote(token: &str) -> String {
    token.trim_matches(|c| c == '"' || c == '\'').to_string()
}
