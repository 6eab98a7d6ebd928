use super::Opcode;
use crate::lang::ast::{Operand, Statement};
use crate::lang::Line;

/// A parsed statement together with the source line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    statement: Statement,
    line: Line,
}

impl Instruction {
    pub fn new(statement: Statement, line: Line) -> Instruction {
        Instruction { statement, line }
    }

    pub fn opcode(&self) -> Opcode {
        self.statement.opcode
    }

    pub fn a(&self) -> Option<&Operand> {
        self.statement.a.as_ref()
    }

    pub fn b(&self) -> Option<&Operand> {
        self.statement.b.as_ref()
    }

    pub fn line(&self) -> &Line {
        &self.line
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.statement)
    }
}
