/// ## Virtual machine instruction set
///
/// Opcodes are named for what they do at run time, not for the keyword
/// that produces them. `undefine x` compiles to `AllocScalar`.
///
/// The six conditionals execute their block while the condition holds and
/// otherwise jump past the matching `EndIf`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // *** Memory
    AllocScalar,
    AllocArray,
    FreeScalar,
    FreeArray,

    // *** I/O
    /// Emit the value as decimal text.
    EmitDecimal,
    /// Emit the value as one character.
    EmitChar,
    /// Read one integer from input into a cell.
    Input,

    // *** Bulk arithmetic, applied to every cell except the named ones
    BulkAdd,
    BulkSub,

    // *** Blocks
    IfEqual,
    IfNotEqual,
    IfLess,
    IfLessEqual,
    IfGreater,
    IfGreaterEqual,
    EndIf,

    // *** Marks
    SetMark,
    DeleteMark,
    Remember,
    Jump,
}

impl Opcode {
    pub const ALL: [Opcode; 20] = [
        Opcode::AllocScalar,
        Opcode::AllocArray,
        Opcode::FreeScalar,
        Opcode::FreeArray,
        Opcode::EmitDecimal,
        Opcode::EmitChar,
        Opcode::Input,
        Opcode::BulkAdd,
        Opcode::BulkSub,
        Opcode::IfEqual,
        Opcode::IfNotEqual,
        Opcode::IfLess,
        Opcode::IfLessEqual,
        Opcode::IfGreater,
        Opcode::IfGreaterEqual,
        Opcode::EndIf,
        Opcode::SetMark,
        Opcode::DeleteMark,
        Opcode::Remember,
        Opcode::Jump,
    ];

    pub fn is_conditional(self) -> bool {
        self.condition().is_some()
    }

    /// The test a conditional applies to its two operands.
    pub fn condition(self) -> Option<fn(i32, i32) -> bool> {
        use Opcode::*;
        let f: fn(i32, i32) -> bool = match self {
            IfEqual => |a, b| a == b,
            IfNotEqual => |a, b| a != b,
            IfLess => |a, b| a < b,
            IfLessEqual => |a, b| a <= b,
            IfGreater => |a, b| a > b,
            IfGreaterEqual => |a, b| a >= b,
            _ => return None,
        };
        Some(f)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            AllocScalar => write!(f, "ALLOC"),
            AllocArray => write!(f, "ALLOCARR"),
            FreeScalar => write!(f, "FREE"),
            FreeArray => write!(f, "FREEARR"),
            EmitDecimal => write!(f, "EMIT"),
            EmitChar => write!(f, "EMITCHR"),
            Input => write!(f, "INPUT"),
            BulkAdd => write!(f, "BULKADD"),
            BulkSub => write!(f, "BULKSUB"),
            IfEqual => write!(f, "IFEQ"),
            IfNotEqual => write!(f, "IFNOTEQ"),
            IfLess => write!(f, "IFLT"),
            IfLessEqual => write!(f, "IFLTEQ"),
            IfGreater => write!(f, "IFGT"),
            IfGreaterEqual => write!(f, "IFGTEQ"),
            EndIf => write!(f, "ENDIF"),
            SetMark => write!(f, "MARK"),
            DeleteMark => write!(f, "UNMARK"),
            Remember => write!(f, "REMEMBER"),
            Jump => write!(f, "JUMP"),
        }
    }
}
