//! DTD content models
//!
//!     The content model of `<!ELEMENT name content>` decides what fields a binding gets.
//!     [ContentModel::parse] classifies the raw expression in this order:
//!
//!     1. `EMPTY` and `ANY` are keywords.
//!     2. Anything mentioning `#PCDATA` is mixed content. Only the element names are kept.
//!     3. Anything still holding a `%entity;` reference is unsupported: content-model
//!        entities are never expanded.
//!     4. Everything else goes through the tokenizer and the recursive-descent parser in
//!        [parser], which keeps nested groups intact:
//!
//!            particle := ( '(' group ')' | NAME ) occurrence?
//!            group    := particle ( ',' particle )*
//!                      | particle ( '|' particle )*
//!
//!     Malformed expressions produce a [ContentModelError]. Callers treat those as "no child
//!     fields", never as a failure of the run.

pub mod parser;
pub mod tokens;

use crate::error::ContentModelError;
use logos::Logos;
use serde::Serialize;
use tokens::Token;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentModel {
    Empty,
    Any,
    /// Text, optionally interleaved with the named elements
    Mixed { names: Vec<String>, repeated: bool },
    Children(Particle),
    /// Holds a parameter-entity reference that was never expanded
    Unsupported { reference: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Particle {
    pub term: Term,
    pub occurrence: Occurrence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Term {
    Name(String),
    Sequence(Vec<Particle>),
    Choice(Vec<Particle>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Occurrence {
    Once,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Occurrence {
    /// `*` and `+` allow more than one occurrence
    pub fn repeats(self) -> bool {
        matches!(self, Occurrence::ZeroOrMore | Occurrence::OneOrMore)
    }
}

impl ContentModel {
    pub fn parse(source: &str) -> Result<ContentModel, ContentModelError> {
        let source = source.trim();

        match source {
            "" => return Err(ContentModelError::Empty),
            "EMPTY" => return Ok(ContentModel::Empty),
            "ANY" => return Ok(ContentModel::Any),
            _ => {}
        }

        if source.contains("#PCDATA") {
            return Ok(mixed(source));
        }

        if source.contains('%') {
            return Ok(ContentModel::Unsupported {
                reference: first_entity_reference(source),
            });
        }

        parser::parse_children(source).map(ContentModel::Children)
    }

    /// `#PCDATA` with no element alternatives
    pub fn is_pure_text(&self) -> bool {
        matches!(self, ContentModel::Mixed { names, .. } if names.is_empty())
    }

    pub fn has_text(&self) -> bool {
        matches!(self, ContentModel::Mixed { .. })
    }
}

impl Particle {
    pub fn new(term: Term, occurrence: Occurrence) -> Self {
        Particle { term, occurrence }
    }

    pub fn name(name: impl Into<String>, occurrence: Occurrence) -> Self {
        Particle::new(Term::Name(name.into()), occurrence)
    }

    /// Whether a choice group appears anywhere in this particle
    pub fn contains_choice(&self) -> bool {
        match &self.term {
            Term::Name(_) => false,
            Term::Choice(_) => true,
            Term::Sequence(members) => members.iter().any(Particle::contains_choice),
        }
    }

    /// Visit every name in document order with whether it may repeat: either its own
    /// indicator or that of any enclosing group is `*` or `+`.
    pub fn visit_names<'a>(&'a self, visit: &mut impl FnMut(&'a str, bool)) {
        self.visit_names_within(false, visit);
    }

    fn visit_names_within<'a>(&'a self, enclosing_repeats: bool, visit: &mut impl FnMut(&'a str, bool)) {
        let repeats = enclosing_repeats || self.occurrence.repeats();
        match &self.term {
            Term::Name(name) => visit(name, repeats),
            Term::Sequence(members) | Term::Choice(members) => {
                for member in members {
                    member.visit_names_within(repeats, visit);
                }
            }
        }
    }
}

/// Element names of a mixed model, first-seen order without duplicates. Lexing is lenient
/// here: unknown characters and entity references are skipped.
fn mixed(source: &str) -> ContentModel {
    let mut names: Vec<String> = Vec::new();
    for token in Token::lexer(source).flatten() {
        if let Token::Name(name) = token {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    ContentModel::Mixed {
        names,
        repeated: source.ends_with('*') || source.ends_with('+'),
    }
}

fn first_entity_reference(source: &str) -> String {
    Token::lexer(source)
        .flatten()
        .find_map(|token| match token {
            Token::ParameterEntity(name) => Some(name.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| source.to_string())
}
