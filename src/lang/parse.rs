use super::ast::{Operand, Statement};
use super::lex::lex;
use super::token::Token;
use super::{Error, Line, Phase};
use crate::error;
use crate::mach::Opcode;

type Result<T> = std::result::Result<T, Error>;

/// Parse one source line. Blank and comment-only lines produce nothing.
pub fn parse(line: &Line) -> Result<Option<Statement>> {
    match parse_code(line.code()) {
        Err(e) => Err(e.in_line(line).in_phase(Phase::Lexing)),
        Ok(r) => Ok(r),
    }
}

/// Usage strings and opcodes of the grammar, in matching order.
pub fn grammar() -> impl Iterator<Item = (&'static str, Opcode)> {
    GRAMMAR.iter().map(|p| (p.usage, p.opcode))
}

fn parse_code(code: &str) -> Result<Option<Statement>> {
    let tokens = lex(code)?;
    if tokens.is_empty() {
        return Ok(None);
    }
    match GRAMMAR.iter().find(|p| p.matches(&tokens)) {
        Some(pattern) => pattern.build(&tokens).map(Some),
        None => Err(error!(UnknownCommand; code)),
    }
}

/// Where an operand comes from and what it may be.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Unused,
    /// Literal or reference.
    Value(usize),
    /// Scalar or array element; no literal.
    Reference(usize),
    /// Bare name; no literal, no subscript.
    Name(usize),
    /// Name with a subscript; the subscript is a size.
    Array(usize),
}

impl Slot {
    fn position(self) -> Option<usize> {
        match self {
            Slot::Unused => None,
            Slot::Value(i) | Slot::Reference(i) | Slot::Name(i) | Slot::Array(i) => Some(i),
        }
    }
}

struct Pattern {
    usage: &'static str,
    keywords: &'static [(usize, &'static str)],
    opcode: Opcode,
    a: Slot,
    b: Slot,
}

// The keywords say the opposite of what the opcodes do. First match wins,
// so longer forms must precede their prefixes.
static GRAMMAR: &[Pattern] = &[
    Pattern {
        usage: "undefine single <name>[<size>]",
        keywords: &[(0, "undefine"), (1, "single")],
        opcode: Opcode::AllocArray,
        a: Slot::Array(2),
        b: Slot::Unused,
    },
    Pattern {
        usage: "undefine <name>",
        keywords: &[(0, "undefine")],
        opcode: Opcode::AllocScalar,
        a: Slot::Name(1),
        b: Slot::Unused,
    },
    Pattern {
        usage: "define single <name>",
        keywords: &[(0, "define"), (1, "single")],
        opcode: Opcode::FreeArray,
        a: Slot::Name(2),
        b: Slot::Unused,
    },
    Pattern {
        usage: "define <name>",
        keywords: &[(0, "define")],
        opcode: Opcode::FreeScalar,
        a: Slot::Name(1),
        b: Slot::Unused,
    },
    Pattern {
        usage: "read to <name>",
        keywords: &[(0, "read"), (1, "to")],
        opcode: Opcode::EmitDecimal,
        a: Slot::Reference(2),
        b: Slot::Unused,
    },
    Pattern {
        usage: "sub <value> from <name>",
        keywords: &[(0, "sub"), (2, "from")],
        opcode: Opcode::BulkAdd,
        a: Slot::Value(1),
        b: Slot::Reference(3),
    },
    Pattern {
        usage: "add <value> to <name>",
        keywords: &[(0, "add"), (2, "to")],
        opcode: Opcode::BulkSub,
        a: Slot::Value(1),
        b: Slot::Reference(3),
    },
    Pattern {
        usage: "read as number to <value>",
        keywords: &[(0, "read"), (1, "as"), (2, "number"), (3, "to")],
        opcode: Opcode::EmitChar,
        a: Slot::Value(4),
        b: Slot::Unused,
    },
    Pattern {
        usage: "print <name>",
        keywords: &[(0, "print")],
        opcode: Opcode::Input,
        a: Slot::Reference(1),
        b: Slot::Unused,
    },
    Pattern {
        usage: "if <value> not equal to <value>",
        keywords: &[(0, "if"), (2, "not"), (3, "equal"), (4, "to")],
        opcode: Opcode::IfEqual,
        a: Slot::Value(1),
        b: Slot::Value(5),
    },
    Pattern {
        usage: "if <value> equal to <value>",
        keywords: &[(0, "if"), (2, "equal"), (3, "to")],
        opcode: Opcode::IfNotEqual,
        a: Slot::Value(1),
        b: Slot::Value(4),
    },
    Pattern {
        usage: "if <value> greater than <value>",
        keywords: &[(0, "if"), (2, "greater"), (3, "than")],
        opcode: Opcode::IfLessEqual,
        a: Slot::Value(1),
        b: Slot::Value(4),
    },
    Pattern {
        usage: "if <value> lower than <value>",
        keywords: &[(0, "if"), (2, "lower"), (3, "than")],
        opcode: Opcode::IfGreaterEqual,
        a: Slot::Value(1),
        b: Slot::Value(4),
    },
    Pattern {
        usage: "if <value> greater or equal than <value>",
        keywords: &[(0, "if"), (2, "greater"), (3, "or"), (4, "equal"), (5, "than")],
        opcode: Opcode::IfLess,
        a: Slot::Value(1),
        b: Slot::Value(6),
    },
    Pattern {
        usage: "if <value> lower or equal than <value>",
        keywords: &[(0, "if"), (2, "lower"), (3, "or"), (4, "equal"), (5, "than")],
        opcode: Opcode::IfGreater,
        a: Slot::Value(1),
        b: Slot::Value(6),
    },
    Pattern {
        usage: "fi",
        keywords: &[(0, "fi")],
        opcode: Opcode::EndIf,
        a: Slot::Unused,
        b: Slot::Unused,
    },
    Pattern {
        usage: "unmark <name>",
        keywords: &[(0, "unmark")],
        opcode: Opcode::SetMark,
        a: Slot::Name(1),
        b: Slot::Unused,
    },
    Pattern {
        usage: "mark <name>",
        keywords: &[(0, "mark")],
        opcode: Opcode::DeleteMark,
        a: Slot::Name(1),
        b: Slot::Unused,
    },
    Pattern {
        usage: "forget <name>",
        keywords: &[(0, "forget")],
        opcode: Opcode::Remember,
        a: Slot::Name(1),
        b: Slot::Unused,
    },
    Pattern {
        usage: "halt",
        keywords: &[(0, "halt")],
        opcode: Opcode::Jump,
        a: Slot::Unused,
        b: Slot::Unused,
    },
];

impl Pattern {
    fn matches(&self, tokens: &[Token]) -> bool {
        self.keywords
            .iter()
            .all(|(i, word)| tokens.get(*i).map_or(false, |t| t.is_word(word)))
    }

    fn last_position(&self) -> usize {
        let keywords = self.keywords.iter().map(|(i, _)| *i);
        let slots = self.a.position().into_iter().chain(self.b.position());
        keywords.chain(slots).max().unwrap_or(0)
    }

    fn build(&self, tokens: &[Token]) -> Result<Statement> {
        let a = self.operand(self.a, tokens)?;
        let b = self.operand(self.b, tokens)?;
        if tokens.len() > self.last_position() + 1 {
            let extra = tokens[self.last_position() + 1..]
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            return Err(error!(TrailingWords; format!("unexpected {:?}; usage: {}", extra, self.usage)));
        }
        Ok(Statement {
            opcode: self.opcode,
            a,
            b,
        })
    }

    fn operand(&self, slot: Slot, tokens: &[Token]) -> Result<Option<Operand>> {
        let position = match slot.position() {
            None => return Ok(None),
            Some(position) => position,
        };
        let token = match tokens.get(position) {
            Some(token) => token,
            None => {
                return Err(error!(InsufficientWords; format!(
                    "{} needs word {}; usage: {}",
                    self.opcode,
                    position + 1,
                    self.usage
                )))
            }
        };
        if token.is_literal() && !matches!(slot, Slot::Value(_)) {
            return Err(error!(LiteralNotAllowed; format!(
                "{} takes a name at word {}, found {}",
                self.opcode,
                position + 1,
                token
            )));
        }
        match (slot, token) {
            (Slot::Name(_), Token::Element(..)) => Err(error!(ExpectedName; format!(
                "{} takes a bare name at word {}, found {}",
                self.opcode,
                position + 1,
                token
            ))),
            (Slot::Array(_), Token::Name(_)) => Err(error!(ExpectedArray; format!(
                "{} takes name[size] at word {}, found {}",
                self.opcode,
                position + 1,
                token
            ))),
            _ => Ok(Some(token.to_operand())),
        }
    }
}
