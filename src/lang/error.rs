use super::Line;
use std::rc::Rc;

/// ## Structured diagnostic
///
/// Every failure the interpreter reports, from a stray `fi` to a leftover
/// variable at the end of a run, is one of these. The position is always the
/// forward (top to bottom) line number together with its distance from the
/// end of the source, because programs run bottom to top.

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    phase: Option<Phase>,
    line_number: Option<usize>,
    from_bottom: Option<usize>,
    text: Option<Rc<str>>,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            phase: None,
            line_number: None,
            from_bottom: None,
            text: None,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Forward line number, 1-based.
    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// Line number counted from the bottom of the source, 1-based.
    pub fn from_bottom(&self) -> Option<usize> {
        self.from_bottom
    }

    /// Text of the offending source line.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn detail(&self) -> &str {
        &self.message
    }

    pub fn is_internal(&self) -> bool {
        self.code == ErrorCode::InternalError
    }

    /// Attach a source position. A position already present wins; errors
    /// raised deep inside a step keep the line they were raised for.
    pub fn in_line(mut self, line: &Line) -> Error {
        if self.line_number.is_none() {
            self.line_number = Some(line.number());
            self.from_bottom = Some(line.from_bottom());
            self.text = Some(line.text_rc());
        }
        self
    }

    pub fn in_phase(mut self, phase: Phase) -> Error {
        if self.phase.is_none() {
            self.phase = Some(phase);
        }
        self
    }

    pub fn message<S: Into<String>>(mut self, message: S) -> Error {
        debug_assert!(self.message.is_empty());
        self.message = message.into();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnknownCommand,
    InsufficientWords,
    LiteralNotAllowed,
    ExpectedName,
    ExpectedArray,
    MalformedOperand,
    TrailingWords,
    NoMatchingIf,
    NoMatchingFi,
    UndefinedVariable,
    UndefinedArray,
    IndexOutOfRange,
    IllegalArraySize,
    AssignToLiteral,
    IllegalCharacter,
    NothingRemembered,
    UndefinedMark,
    LeftoverState,
    InputFailure,
    Overflow,
    OutOfMemory,
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let s = match self {
            UnknownCommand => "UNKNOWN COMMAND",
            InsufficientWords => "INSUFFICIENT WORDS",
            LiteralNotAllowed => "LITERAL NOT ALLOWED",
            ExpectedName => "NAME EXPECTED",
            ExpectedArray => "ARRAY EXPECTED",
            MalformedOperand => "MALFORMED OPERAND",
            TrailingWords => "TRAILING WORDS",
            NoMatchingIf => "FI WITHOUT IF",
            NoMatchingFi => "IF WITHOUT FI",
            UndefinedVariable => "UNDEFINED VARIABLE",
            UndefinedArray => "UNDEFINED ARRAY",
            IndexOutOfRange => "SUBSCRIPT OUT OF RANGE",
            IllegalArraySize => "ILLEGAL ARRAY SIZE",
            AssignToLiteral => "CANNOT ASSIGN TO A LITERAL",
            IllegalCharacter => "ILLEGAL CHARACTER",
            NothingRemembered => "NOTHING REMEMBERED",
            UndefinedMark => "UNDEFINED MARK",
            LeftoverState => "LEFTOVER STATE",
            InputFailure => "INPUT FAILURE",
            Overflow => "OVERFLOW",
            OutOfMemory => "OUT OF MEMORY",
            InternalError => "INTERNAL ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Stage of the pipeline that raised an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    PreProcessing,
    Lexing,
    Linking,
    Execution,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Phase::PreProcessing => write!(f, "PRE-PROCESSING"),
            Phase::Lexing => write!(f, "LEXING"),
            Phase::Linking => write!(f, "LINKING"),
            Phase::Execution => write!(f, "EXECUTION"),
        }
    }
}

impl std::error::Error for Error {}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(phase) = self.phase {
            write!(f, "{} ", phase)?;
        }
        write!(f, "{}", self.code)?;
        if let (Some(number), Some(from_bottom)) = (self.line_number, self.from_bottom) {
            write!(f, " IN {} ({} FROM BOTTOM)", number, from_bottom)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        if let Some(text) = &self.text {
            write!(f, "\n\"{}\"", text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_line() {
        let line = Line::new(2, 4, "define x");
        let e = error!(UndefinedVariable, &line; "x").in_phase(Phase::Execution);
        assert_eq!(
            e.to_string(),
            "EXECUTION UNDEFINED VARIABLE IN 2 (3 FROM BOTTOM); x\n\"define x\""
        );
    }

    #[test]
    fn test_first_position_wins() {
        let first = Line::new(1, 3, "halt");
        let second = Line::new(3, 3, "forget x");
        let e = error!(NothingRemembered, &first).in_line(&second);
        assert_eq!(e.line_number(), Some(1));
        assert_eq!(e.text(), Some("halt"));
    }

    #[test]
    fn test_bare_code() {
        assert_eq!(error!(Overflow).to_string(), "OVERFLOW");
        assert!(error!(InternalError).is_internal());
    }
}
