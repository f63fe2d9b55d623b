//! Content-model compiler
//!
//!     Turns a [ParseResult] into a [Schema]: one [Definition] per declared element, in
//!     declaration order. Each element goes through four steps.
//!
//!     1. Classification. An element whose content is `EMPTY` or pure `#PCDATA` and that has no
//!        attributes is simple. Simple elements get no record type; wherever they appear as a
//!        child they become string fields. Children that are never declared are simple too.
//!     2. Content fields, from the parsed [ContentModel].
//!     3. Attribute fields. Every attribute is string-like; `IDREFS`, `NMTOKENS` and `ENTITIES`
//!        become collections.
//!     4. Assembly into an [ElementShape].
//!
//! Cardinality
//!
//!     A child field is repeated when its own indicator or that of an enclosing group is `*` or
//!     `+`. With [ChoicePolicy::RepeatAll], the default, a content model containing any choice
//!     makes every child repeated. That over-approximates `(a | b)`, where each alternative
//!     occurs at most once, but it never rejects a valid document. [ChoicePolicy::Optional]
//!     turns the rule off. Every other child is a singular optional field: the generated
//!     bindings never enforce presence of child elements.
//!
//! Naming
//!
//!     Type names are unique across the schema and field names are unique within a record;
//!     collisions get numeric suffixes in declaration order. `XMLName` is reserved for the
//!     identity field of the Go output.

use crate::content_model::{ContentModel, Particle};
use crate::naming::{self, UniqueNames};
use dtdbind_parser::{AttributeDecl, AttributeDefault, ElementDecl, ParseResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Field name reserved for the element identity in generated records
pub const IDENTITY_FIELD: &str = "XMLName";
const TEXT_FIELD: &str = "Text";
const CONTENT_FIELD: &str = "Content";

/// How children of a choice group are typed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChoicePolicy {
    /// Any `|` in the model makes every child a collection
    #[default]
    RepeatAll,
    /// Choice members are singular unless an occurrence indicator says otherwise
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    pub package: String,
    pub choice_policy: ChoicePolicy,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            package: "main".to_string(),
            choice_policy: ChoicePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub package: String,
    pub definitions: Vec<Definition>,
}

impl Schema {
    /// Definitions that produce a record type, in declaration order
    pub fn records(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter().filter(|d| !d.is_simple())
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    /// Element name as written in the DTD
    pub element: String,
    /// Record type name. Simple elements have no type; theirs is only informational and may
    /// coincide with a record's name.
    pub type_name: String,
    pub shape: ElementShape,
}

impl Definition {
    pub fn is_simple(&self) -> bool {
        matches!(self.shape, ElementShape::Simple)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ElementShape {
    /// Maps to a plain string wherever the element is used
    Simple,
    Empty {
        attributes: Vec<AttributeField>,
    },
    /// `ANY`: the inner markup is kept as one raw field
    RawContent {
        attributes: Vec<AttributeField>,
        content_field: String,
    },
    Structured {
        attributes: Vec<AttributeField>,
        children: Vec<ChildField>,
        text_field: Option<String>,
    },
}

impl ElementShape {
    pub fn attributes(&self) -> &[AttributeField] {
        match self {
            ElementShape::Simple => &[],
            ElementShape::Empty { attributes }
            | ElementShape::RawContent { attributes, .. }
            | ElementShape::Structured { attributes, .. } => attributes,
        }
    }

    pub fn children(&self) -> &[ChildField] {
        match self {
            ElementShape::Structured { children, .. } => children,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeField {
    pub xml_name: String,
    pub field_name: String,
    pub multi_valued: bool,
    pub required: bool,
    pub default_value: Option<String>,
    /// The default is `#FIXED`
    pub fixed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildField {
    pub xml_name: String,
    pub field_name: String,
    pub cardinality: Cardinality,
    pub kind: ChildKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    Optional,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildKind {
    Text,
    /// Reference to the record type of another element
    Record(String),
}

/// Compile every element of `result` in declaration order.
pub fn compile(result: &ParseResult, options: &CompileOptions) -> Schema {
    let mut models: HashMap<&str, Option<ContentModel>> = HashMap::new();
    for element in result.iter() {
        let model = match ContentModel::parse(&element.content) {
            Ok(model) => Some(model),
            Err(err) => {
                warn!(
                    element = %element.name,
                    content = %element.content,
                    "Content model not understood, no child fields derived: {}",
                    err
                );
                None
            }
        };
        models.insert(element.name.as_str(), model);
    }

    let compiler = Compiler {
        result,
        options,
        type_names: allocate_type_names(result, &models),
        models,
    };

    let definitions = result.iter().map(|e| compiler.definition(e)).collect();

    Schema {
        package: options.package.clone(),
        definitions,
    }
}

struct Compiler<'a> {
    result: &'a ParseResult,
    options: &'a CompileOptions,
    models: HashMap<&'a str, Option<ContentModel>>,
    type_names: HashMap<&'a str, String>,
}

fn is_simple_element(element: &ElementDecl, model: Option<&ContentModel>) -> bool {
    element.attributes.is_empty()
        && matches!(model, Some(m) if *m == ContentModel::Empty || m.is_pure_text())
}

fn allocate_type_names<'a>(
    result: &'a ParseResult,
    models: &HashMap<&str, Option<ContentModel>>,
) -> HashMap<&'a str, String> {
    let mut names = UniqueNames::new();
    result
        .iter()
        .filter(|e| {
            !is_simple_element(e, models.get(e.name.as_str()).and_then(Option::as_ref))
        })
        .map(|e| (e.name.as_str(), names.allocate(&naming::type_name(&e.name))))
        .collect()
}

impl<'a> Compiler<'a> {
    fn model(&self, name: &str) -> Option<&ContentModel> {
        self.models.get(name).and_then(Option::as_ref)
    }

    /// Undeclared elements count as simple
    fn is_simple(&self, name: &str) -> bool {
        match self.result.get(name) {
            Some(element) => is_simple_element(element, self.model(name)),
            None => true,
        }
    }

    fn definition(&self, element: &ElementDecl) -> Definition {
        let Some(type_name) = self.type_names.get(element.name.as_str()) else {
            return Definition {
                element: element.name.clone(),
                type_name: naming::type_name(&element.name),
                shape: ElementShape::Simple,
            };
        };

        let mut fields = UniqueNames::new();
        fields.reserve(IDENTITY_FIELD);
        let attributes = attribute_fields(&element.attributes, &mut fields);

        let shape = match self.model(&element.name) {
            Some(ContentModel::Empty) => ElementShape::Empty { attributes },
            Some(ContentModel::Any) => ElementShape::RawContent {
                attributes,
                content_field: fields.allocate(CONTENT_FIELD),
            },
            Some(ContentModel::Mixed { .. }) => ElementShape::Structured {
                attributes,
                children: Vec::new(),
                text_field: Some(fields.allocate(TEXT_FIELD)),
            },
            Some(ContentModel::Unsupported { reference }) => {
                debug!(
                    element = %element.name,
                    "Content model references %{}; entity references in content models are not expanded",
                    reference
                );
                ElementShape::Structured {
                    attributes,
                    children: Vec::new(),
                    text_field: None,
                }
            }
            Some(ContentModel::Children(root)) => ElementShape::Structured {
                attributes,
                children: self.child_fields(root, &mut fields),
                text_field: None,
            },
            None => ElementShape::Structured {
                attributes,
                children: Vec::new(),
                text_field: None,
            },
        };

        Definition {
            element: element.name.clone(),
            type_name: type_name.clone(),
            shape,
        }
    }

    fn child_fields(&self, root: &Particle, fields: &mut UniqueNames) -> Vec<ChildField> {
        let choice_repeats =
            self.options.choice_policy == ChoicePolicy::RepeatAll && root.contains_choice();

        let mut children: Vec<(&str, bool)> = Vec::new();
        root.visit_names(&mut |name, repeats| {
            match children.iter_mut().find(|(seen, _)| *seen == name) {
                Some((_, seen_repeats)) => *seen_repeats |= repeats,
                None => children.push((name, repeats)),
            }
        });

        children
            .into_iter()
            .map(|(name, repeats)| ChildField {
                xml_name: name.to_string(),
                field_name: fields.allocate(&naming::field_name(name)),
                cardinality: if repeats || choice_repeats {
                    Cardinality::Repeated
                } else {
                    Cardinality::Optional
                },
                kind: if self.is_simple(name) {
                    ChildKind::Text
                } else {
                    self.type_names
                        .get(name)
                        .map(|type_name| ChildKind::Record(type_name.clone()))
                        .unwrap_or(ChildKind::Text)
                },
            })
            .collect()
    }
}

fn attribute_fields(attributes: &[AttributeDecl], fields: &mut UniqueNames) -> Vec<AttributeField> {
    attributes
        .iter()
        .map(|attr| AttributeField {
            xml_name: attr.name.clone(),
            field_name: fields.allocate(&naming::field_name(&attr.name)),
            multi_valued: attr.declared_type.is_multi_valued(),
            required: attr.is_required(),
            default_value: attr.default_value().map(str::to_string),
            fixed: matches!(attr.default, AttributeDefault::Fixed(_)),
        })
        .collect()
}
