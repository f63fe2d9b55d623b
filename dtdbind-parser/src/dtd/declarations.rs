//! Declaration recognition
//!
//! Classifies one complete `<!…>` declaration and pulls out its header fields. Anything that
//! does not have the expected shape comes back as [Declaration::Ignored]; the caller drops it.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<!ENTITY % name "value">`, double or single quoted. External entities don't match.
static PARAMETER_ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)^<!ENTITY\s+%\s+([\w.:-]+)\s+(?:"([^"]*)"|'([^']*)')\s*>$"#)
        .expect("parameter entity pattern is valid")
});

static ELEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^<!ELEMENT\s+([\w.:-]+)\s+([^>]+?)\s*>$").expect("element pattern is valid")
});

static ATTLIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^<!ATTLIST\s+([\w.:-]+)(.*)>$").expect("attlist pattern is valid")
});

/// A recognised declaration, borrowing from the declaration text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration<'a> {
    ParameterEntity { name: &'a str, value: &'a str },
    Element { name: &'a str, content: &'a str },
    AttributeList { element: &'a str, body: &'a str },
    Ignored,
}

/// Recognise a single declaration by its leading keyword.
pub fn recognize(declaration: &str) -> Declaration<'_> {
    let declaration = declaration.trim();

    if declaration.starts_with("<!ENTITY") {
        recognize_entity(declaration)
    } else if declaration.starts_with("<!ELEMENT") {
        recognize_element(declaration)
    } else if declaration.starts_with("<!ATTLIST") {
        recognize_attlist(declaration)
    } else {
        Declaration::Ignored
    }
}

fn recognize_entity(declaration: &str) -> Declaration<'_> {
    let Some(caps) = PARAMETER_ENTITY.captures(declaration) else {
        return Declaration::Ignored;
    };
    let name = caps.get(1).map_or("", |m| m.as_str());
    let value = caps
        .get(2)
        .or_else(|| caps.get(3))
        .map_or("", |m| m.as_str());
    Declaration::ParameterEntity { name, value }
}

fn recognize_element(declaration: &str) -> Declaration<'_> {
    match ELEMENT.captures(declaration) {
        Some(caps) => Declaration::Element {
            name: caps.get(1).map_or("", |m| m.as_str()),
            content: caps.get(2).map_or("", |m| m.as_str().trim()),
        },
        None => Declaration::Ignored,
    }
}

fn recognize_attlist(declaration: &str) -> Declaration<'_> {
    match ATTLIST.captures(declaration) {
        Some(caps) => Declaration::AttributeList {
            element: caps.get(1).map_or("", |m| m.as_str()),
            body: caps.get(2).map_or("", |m| m.as_str().trim()),
        },
        None => Declaration::Ignored,
    }
}
