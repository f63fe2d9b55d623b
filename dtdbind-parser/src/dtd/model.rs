//! Declarations extracted from a DTD
//!
//! [ParseResult] is the hand-off between the parser and the code generator. It maps element
//! names to their declarations and remembers the order in which elements were first declared,
//! which is the order every consumer iterates in.

use serde::Serialize;
use std::collections::HashMap;

/// A `<!ELEMENT>` declaration together with every attribute declared for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementDecl {
    pub name: String,
    /// Raw content model, e.g. `EMPTY`, `ANY` or `(title, author+)`
    pub content: String,
    pub attributes: Vec<AttributeDecl>,
}

impl ElementDecl {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        ElementDecl {
            name: name.into(),
            content: content.into(),
            attributes: Vec::new(),
        }
    }
}

/// One attribute definition from an `<!ATTLIST>` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDecl {
    pub name: String,
    pub declared_type: AttributeType,
    pub default: AttributeDefault,
}

impl AttributeDecl {
    pub fn new(name: impl Into<String>, declared_type: AttributeType, default: AttributeDefault) -> Self {
        AttributeDecl {
            name: name.into(),
            declared_type,
            default,
        }
    }

    /// True only for `#REQUIRED` attributes
    pub fn is_required(&self) -> bool {
        matches!(self.default, AttributeDefault::Required)
    }

    /// Literal default, present for `#FIXED` and plain default values
    pub fn default_value(&self) -> Option<&str> {
        match &self.default {
            AttributeDefault::Fixed(value) | AttributeDefault::Value(value) => Some(value),
            AttributeDefault::Required | AttributeDefault::Implied => None,
        }
    }
}

/// Declared attribute type.
///
/// Enumerations (`( a | b )`) and notation lists keep no record of their legal values; every
/// variant ends up as a string-like field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeType {
    CData,
    Id,
    IdRef,
    IdRefs,
    NmToken,
    NmTokens,
    Entity,
    Entities,
    Enumerated,
    Other(String),
}

impl AttributeType {
    /// Map a DTD type keyword to its variant. Keywords are matched case-insensitively.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.to_ascii_uppercase().as_str() {
            "CDATA" => AttributeType::CData,
            "ID" => AttributeType::Id,
            "IDREF" => AttributeType::IdRef,
            "IDREFS" => AttributeType::IdRefs,
            "NMTOKEN" => AttributeType::NmToken,
            "NMTOKENS" => AttributeType::NmTokens,
            "ENTITY" => AttributeType::Entity,
            "ENTITIES" => AttributeType::Entities,
            _ => AttributeType::Other(keyword.to_string()),
        }
    }

    /// Whether the attribute value is a whitespace-separated list
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            AttributeType::IdRefs | AttributeType::NmTokens | AttributeType::Entities
        )
    }
}

/// The default-spec part of an attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeDefault {
    Required,
    Implied,
    Fixed(String),
    Value(String),
}

/// Elements keyed by name, plus the order they were first declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub elements: HashMap<String, ElementDecl>,
    pub order: Vec<String>,
}

impl ParseResult {
    pub fn get(&self, name: &str) -> Option<&ElementDecl> {
        self.elements.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Elements in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ElementDecl> {
        self.order.iter().filter_map(|name| self.elements.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_type_keywords() {
        assert_eq!(AttributeType::from_keyword("CDATA"), AttributeType::CData);
        assert_eq!(AttributeType::from_keyword("idrefs"), AttributeType::IdRefs);
        assert_eq!(
            AttributeType::from_keyword("WEIRD"),
            AttributeType::Other("WEIRD".to_string())
        );
    }

    #[test]
    fn test_multi_valued_types() {
        assert!(AttributeType::IdRefs.is_multi_valued());
        assert!(AttributeType::NmTokens.is_multi_valued());
        assert!(AttributeType::Entities.is_multi_valued());
        assert!(!AttributeType::IdRef.is_multi_valued());
        assert!(!AttributeType::Enumerated.is_multi_valued());
    }

    #[test]
    fn test_default_accessors() {
        let required = AttributeDecl::new("id", AttributeType::Id, AttributeDefault::Required);
        assert!(required.is_required());
        assert_eq!(required.default_value(), None);

        let fixed = AttributeDecl::new(
            "version",
            AttributeType::CData,
            AttributeDefault::Fixed("1.0".into()),
        );
        assert!(!fixed.is_required());
        assert_eq!(fixed.default_value(), Some("1.0"));

        let implied = AttributeDecl::new("lang", AttributeType::NmToken, AttributeDefault::Implied);
        assert_eq!(implied.default_value(), None);
    }

    #[test]
    fn test_iter_follows_declaration_order() {
        let mut result = ParseResult::default();
        for name in ["zeta", "alpha", "mid"] {
            result
                .elements
                .insert(name.to_string(), ElementDecl::new(name, "EMPTY"));
            result.order.push(name.to_string());
        }

        let names: Vec<_> = result.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(result.len(), 3);
        assert!(result.contains("mid"));
    }
}
