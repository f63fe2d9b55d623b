//! Token definitions for DTD content models
//!
//! Whitespace between tokens is insignificant and skipped by the lexer.
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'s> {
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,

    // Connectors
    #[token(",")]
    Comma,
    #[token("|")]
    Pipe,

    // Occurrence indicators
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,

    #[token("#PCDATA")]
    PcData,
    #[token("EMPTY")]
    Empty,
    #[token("ANY")]
    Any,

    #[regex(r"%[A-Za-z_:][A-Za-z0-9_:.\-]*;", |lex| {
        let slice = lex.slice();
        &slice[1..slice.len() - 1]
    })]
    ParameterEntity(&'s str),

    #[regex(r"[A-Za-z_:\x{80}-\x{10FFFF}][A-Za-z0-9_:.\-\x{80}-\x{10FFFF}]*", |lex| lex.slice())]
    Name(&'s str),
}

impl Token<'_> {
    /// Human readable form used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::OpenParen => "'('".to_string(),
            Token::CloseParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
            Token::Pipe => "'|'".to_string(),
            Token::Question => "'?'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Plus => "'+'".to_string(),
            Token::PcData => "#PCDATA".to_string(),
            Token::Empty => "EMPTY".to_string(),
            Token::Any => "ANY".to_string(),
            Token::ParameterEntity(name) => format!("entity reference %{};", name),
            Token::Name(name) => format!("name '{}'", name),
        }
    }
}
