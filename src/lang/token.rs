use super::ast::{Index, Operand, Reference};
use std::rc::Rc;

/// A whitespace-separated word of a command line.
///
/// Keywords are plain names; the grammar decides which names are keywords
/// by position alone.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(i32),
    Name(Rc<str>),
    Element(Rc<str>, Index),
}

impl Token {
    pub fn is_word(&self, word: &str) -> bool {
        match self {
            Token::Name(name) => &**name == word,
            _ => false,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }

    pub fn to_operand(&self) -> Operand {
        match self {
            Token::Literal(n) => Operand::Literal(*n),
            Token::Name(name) => Operand::Reference(Reference {
                name: name.clone(),
                index: None,
            }),
            Token::Element(name, index) => Operand::Reference(Reference {
                name: name.clone(),
                index: Some(index.clone()),
            }),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Token::Literal(n) => write!(f, "{}", n),
            Token::Name(s) => write!(f, "{}", s),
            Token::Element(s, i) => write!(f, "{}[{}]", s, i),
        }
    }
}
