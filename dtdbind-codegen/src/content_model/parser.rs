//! Recursive-descent parser for element-only content models
//!
//! Mixed content, keywords and entity references are classified before this parser runs, so
//! it only has to deal with names, groups, connectors and occurrence indicators.

use super::tokens::Token;
use super::{Occurrence, Particle, Term};
use crate::error::ContentModelError;
use logos::Logos;
use std::ops::Range;

/// Deepest group nesting accepted; the parser and the tree walks recurse per level
pub const MAX_GROUP_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connector {
    Sequence,
    Choice,
}

struct Parser<'s> {
    tokens: Vec<(Token<'s>, Range<usize>)>,
    position: usize,
    source_len: usize,
    depth: usize,
}

/// Parse an element-only content model such as `(head, (para | list)*)`.
pub fn parse_children(source: &str) -> Result<Particle, ContentModelError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(ContentModelError::UnexpectedCharacter {
                    found: lexer.slice().to_string(),
                    offset: lexer.span().start,
                })
            }
        }
    }

    let mut parser = Parser {
        tokens,
        position: 0,
        source_len: source.len(),
        depth: 0,
    };

    let particle = parser.particle()?;
    match parser.next() {
        None => Ok(particle),
        Some((token, span)) => Err(ContentModelError::UnexpectedToken {
            found: token.describe(),
            offset: span.start,
        }),
    }
}

impl<'s> Parser<'s> {
    fn next(&mut self) -> Option<(Token<'s>, Range<usize>)> {
        let item = self.tokens.get(self.position).cloned();
        if item.is_some() {
            self.position += 1;
        }
        item
    }

    fn peek(&self) -> Option<Token<'s>> {
        self.tokens.get(self.position).map(|(token, _)| *token)
    }

    fn particle(&mut self) -> Result<Particle, ContentModelError> {
        let term = match self.next() {
            Some((Token::OpenParen, span)) => {
                if self.depth == MAX_GROUP_DEPTH {
                    return Err(ContentModelError::TooDeep { offset: span.start });
                }
                self.depth += 1;
                let group = self.group(span.start);
                self.depth -= 1;
                group?
            }
            Some((Token::Name(name), _)) => Term::Name(name.to_string()),
            // Keywords are ordinary names once inside a group
            Some((Token::Empty, _)) => Term::Name("EMPTY".to_string()),
            Some((Token::Any, _)) => Term::Name("ANY".to_string()),
            Some((token, span)) => {
                return Err(ContentModelError::UnexpectedToken {
                    found: token.describe(),
                    offset: span.start,
                })
            }
            None => {
                return Err(ContentModelError::UnexpectedEnd {
                    offset: self.source_len,
                })
            }
        };

        Ok(Particle::new(term, self.occurrence()))
    }

    fn group(&mut self, open: usize) -> Result<Term, ContentModelError> {
        let mut members = vec![self.particle()?];
        let mut connector: Option<Connector> = None;

        loop {
            let (token, span) = self
                .next()
                .ok_or(ContentModelError::UnclosedGroup { offset: open })?;

            let this = match token {
                Token::CloseParen => break,
                Token::Comma => Connector::Sequence,
                Token::Pipe => Connector::Choice,
                other => {
                    return Err(ContentModelError::UnexpectedToken {
                        found: other.describe(),
                        offset: span.start,
                    })
                }
            };

            match connector {
                Some(existing) if existing != this => {
                    return Err(ContentModelError::MixedConnectors { offset: span.start })
                }
                _ => connector = Some(this),
            }

            members.push(self.particle()?);
        }

        Ok(match connector {
            Some(Connector::Choice) => Term::Choice(members),
            Some(Connector::Sequence) | None => Term::Sequence(members),
        })
    }

    fn occurrence(&mut self) -> Occurrence {
        let occurrence = match self.peek() {
            Some(Token::Question) => Occurrence::Optional,
            Some(Token::Star) => Occurrence::ZeroOrMore,
            Some(Token::Plus) => Occurrence::OneOrMore,
            _ => return Occurrence::Once,
        };
        self.position += 1;
        occurrence
    }
}
