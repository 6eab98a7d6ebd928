use crate::mach::Opcode;
use std::rc::Rc;

/// One parsed command: the opcode and up to two operands.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub opcode: Opcode,
    pub a: Option<Operand>,
    pub b: Option<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(i32),
    Reference(Reference),
}

/// A scalar name, or an array name with a subscript.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub name: Rc<str>,
    pub index: Option<Index>,
}

/// Array subscripts do not nest: a literal or a scalar name.
#[derive(Debug, Clone, PartialEq)]
pub enum Index {
    Literal(i32),
    Scalar(Rc<str>),
}

impl Reference {
    pub fn scalar(name: &str) -> Reference {
        Reference {
            name: name.into(),
            index: None,
        }
    }

    pub fn element(name: &str, index: Index) -> Reference {
        Reference {
            name: name.into(),
            index: Some(index),
        }
    }

    pub fn is_scalar(&self) -> bool {
        self.index.is_none()
    }
}

impl Operand {
    pub fn reference(&self) -> Option<&Reference> {
        match self {
            Operand::Reference(r) => Some(r),
            Operand::Literal(_) => None,
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Operand::Literal(n) => write!(f, "{}", n),
            Operand::Reference(r) => write!(f, "{}", r),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.index {
            None => write!(f, "{}", self.name),
            Some(index) => write!(f, "{}[{}]", self.name, index),
        }
    }
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Index::Literal(n) => write!(f, "{}", n),
            Index::Scalar(s) => write!(f, "{}", s),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.opcode)?;
        match (&self.a, &self.b) {
            (Some(a), Some(b)) => write!(f, " {}, {}", a, b),
            (Some(a), None) => write!(f, " {}", a),
            (None, Some(b)) => write!(f, " _, {}", b),
            (None, None) => Ok(()),
        }
    }
}
