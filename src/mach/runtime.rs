use super::{Address, Instruction, Opcode, Program, Var};
use crate::error;
use crate::lang::ast::{Index, Operand, Reference};
use crate::lang::{Error, Phase};
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Execution engine
///
/// One instruction pointer walks the compiled program. Each step executes
/// exactly one instruction and yields at most one line of output. Input is
/// pulled synchronously from a callback when a `print` statement runs.

pub struct Runtime {
    program: Program,
    state: State,
}

/// Result of a bounded [`Runtime::execute`] slice.
#[derive(Debug, PartialEq)]
pub enum Event {
    Print(String),
    /// The cycle budget ran out before the program finished.
    Running,
    Stopped,
    Error(Error),
}

#[derive(Debug, Default)]
struct State {
    pc: Option<Address>,
    var: Var,
    marks: HashMap<Rc<str>, Address>,
    remembered: Option<Rc<str>>,
    halted: bool,
    steps: usize,
    // Leftover state found after an instruction that also produced output.
    pending: Option<Error>,
}

impl Runtime {
    pub fn new(program: Program) -> Runtime {
        Runtime {
            program,
            state: State::default(),
        }
    }

    /// Discard all state so the program can run again from the start.
    pub fn reset(&mut self) {
        self.state = State::default();
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn is_finished(&self) -> bool {
        self.state.pending.is_none()
            && (self.state.halted || self.state.next() >= self.program.len())
    }

    /// Number of instructions executed since the last reset.
    pub fn steps(&self) -> usize {
        self.state.steps
    }

    /// Address of the instruction executed last.
    pub fn pc(&self) -> Option<Address> {
        self.state.pc
    }

    pub fn delta(&self) -> i32 {
        self.state.var.delta()
    }

    pub fn value_of(&self, name: &str) -> Option<i32> {
        let operand = Operand::Reference(Reference::scalar(name));
        self.state.var.fetch(&operand).ok()
    }

    pub fn element_of(&self, name: &str, index: i32) -> Option<i32> {
        let operand = Operand::Reference(Reference::element(name, Index::Literal(index)));
        self.state.var.fetch(&operand).ok()
    }

    pub fn mark_of(&self, name: &str) -> Option<Address> {
        self.state.marks.get(name).copied()
    }

    pub fn remembered(&self) -> Option<&str> {
        self.state.remembered.as_deref()
    }

    /// Execute the next instruction. Does nothing once the program has
    /// finished or failed.
    ///
    /// When the last instruction prints and leaves state behind, the output
    /// is returned first and the error on the following call.
    pub fn step<I>(&mut self, input: &mut I) -> Result<Option<String>>
    where
        I: FnMut() -> Result<i32>,
    {
        if let Some(e) = self.state.pending.take() {
            self.state.halted = true;
            return Err(e);
        }
        if self.is_finished() {
            return Ok(None);
        }
        let addr = self.state.next();
        self.state.pc = Some(addr);
        self.state.steps += 1;
        let instruction = &self.program.instructions()[addr];
        log::trace!(
            "{:>5} {:<24} delta={}",
            addr,
            instruction.to_string(),
            self.state.var.delta()
        );
        let result = match self.state.execute(&self.program, addr, instruction, input) {
            Ok(out) => match self.state.check_end(&self.program) {
                Ok(()) => Ok(out),
                Err(e) if out.is_some() => {
                    let e = e.in_line(instruction.line()).in_phase(Phase::Execution);
                    self.state.pending = Some(e);
                    Ok(out)
                }
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };
        match result {
            Ok(out) => Ok(out),
            Err(e) => {
                self.state.halted = true;
                Err(e.in_line(instruction.line()).in_phase(Phase::Execution))
            }
        }
    }

    /// Run to completion, handing every output to `output` in program order.
    pub fn run_all<O, I>(&mut self, mut output: O, mut input: I) -> Result<()>
    where
        O: FnMut(String),
        I: FnMut() -> Result<i32>,
    {
        while !self.is_finished() {
            if let Some(s) = self.step(&mut input)? {
                output(s);
            }
        }
        Ok(())
    }

    /// Run at most `cycles` instructions, stopping early at the first output.
    /// An error left over from the previous output is reported even when
    /// `cycles` is zero.
    pub fn execute<I>(&mut self, cycles: usize, input: &mut I) -> Event
    where
        I: FnMut() -> Result<i32>,
    {
        if self.state.pending.is_some() {
            if let Err(e) = self.step(input) {
                return Event::Error(e);
            }
        }
        for _ in 0..cycles {
            if self.is_finished() {
                return Event::Stopped;
            }
            match self.step(input) {
                Ok(Some(s)) => return Event::Print(s),
                Ok(None) => {}
                Err(e) => return Event::Error(e),
            }
        }
        if self.is_finished() {
            Event::Stopped
        } else {
            Event::Running
        }
    }
}

impl State {
    fn next(&self) -> Address {
        self.pc.map_or(0, |pc| pc + 1)
    }

    // The driver advances before executing, so landing on `addr` means
    // parking one before it.
    fn jump_to(&mut self, addr: Address) {
        self.pc = addr.checked_sub(1);
    }

    fn execute<I>(
        &mut self,
        program: &Program,
        addr: Address,
        instruction: &Instruction,
        input: &mut I,
    ) -> Result<Option<String>>
    where
        I: FnMut() -> Result<i32>,
    {
        use Opcode::*;
        match instruction.opcode() {
            AllocScalar => self.var.define(name(instruction.a())?),
            AllocArray => {
                let reference = reference(instruction.a())?;
                let len = match &reference.index {
                    Some(index) => self.var.subscript(index)?,
                    None => return Err(error!(ExpectedArray; reference.name.to_string())),
                };
                self.var.dimension(&reference.name, len)?;
            }
            FreeScalar => self.var.undefine(name(instruction.a())?),
            FreeArray => self.var.undefine_array(name(instruction.a())?),
            EmitDecimal => {
                let value = self.var.fetch(operand(instruction.a())?)?;
                return Ok(Some(value.to_string()));
            }
            EmitChar => {
                let value = self.var.fetch(operand(instruction.a())?)?;
                return match std::char::from_u32(value as u32).filter(|_| value >= 0) {
                    Some(ch) => Ok(Some(ch.to_string())),
                    None => Err(error!(IllegalCharacter; format!("{} is not a character", value))),
                };
            }
            Input => {
                let target = operand(instruction.a())?;
                self.var.locate_operand(target)?;
                let value = input()?;
                self.var.store(target, value)?;
            }
            BulkAdd => self.bulk(1, instruction)?,
            BulkSub => self.bulk(-1, instruction)?,
            IfEqual | IfNotEqual | IfLess | IfLessEqual | IfGreater | IfGreaterEqual => {
                let a = self.var.fetch(operand(instruction.a())?)?;
                let b = self.var.fetch(operand(instruction.b())?)?;
                let holds = match instruction.opcode().condition() {
                    Some(condition) => condition(a, b),
                    None => return Err(error!(InternalError; "NOT A CONDITIONAL")),
                };
                if !holds {
                    match program.jump_target(addr) {
                        Some(end) => self.jump_to(end),
                        None => return Err(error!(InternalError; "UNLINKED CONDITIONAL")),
                    }
                }
            }
            EndIf => {}
            SetMark => {
                self.marks.insert(name(instruction.a())?.clone(), addr + 1);
            }
            DeleteMark => {
                self.marks.remove(name(instruction.a())?);
            }
            Remember => self.remembered = Some(name(instruction.a())?.clone()),
            Jump => {
                let label = match &self.remembered {
                    Some(label) => label,
                    None => return Err(error!(NothingRemembered; "halt with no forget before it")),
                };
                match self.marks.get(label) {
                    Some(&target) => self.jump_to(target),
                    None => return Err(error!(UndefinedMark; label.to_string())),
                }
            }
        }
        Ok(None)
    }

    /// Add `sign * a` to every cell except `b`, and except `a` when `a` is
    /// itself a cell.
    fn bulk(&mut self, sign: i32, instruction: &Instruction) -> Result<()> {
        let a = operand(instruction.a())?;
        let amount = self.var.fetch(a)?.wrapping_mul(sign);
        let keep = self.var.locate_operand(operand(instruction.b())?)?;
        let also_keep = match a.reference() {
            Some(r) => Some(self.var.locate(r)?),
            None => None,
        };
        self.var.bulk_add(amount, &keep, also_keep.as_ref())
    }

    fn check_end(&self, program: &Program) -> Result<()> {
        if self.pc.map_or(true, |pc| pc + 1 != program.len()) {
            return Ok(());
        }
        if self.var.is_empty() && self.marks.is_empty() {
            return Ok(());
        }
        let mut names = self.var.names();
        let mut marks: Vec<String> = self.marks.keys().map(|k| format!("mark {}", k)).collect();
        marks.sort();
        names.append(&mut marks);
        Err(error!(LeftoverState; format!("still alive: {}", names.join(", "))))
    }
}

fn operand(operand: Option<&Operand>) -> Result<&Operand> {
    operand.ok_or_else(|| error!(InternalError; "MISSING OPERAND"))
}

fn reference(op: Option<&Operand>) -> Result<&Reference> {
    match operand(op)? {
        Operand::Reference(r) => Ok(r),
        Operand::Literal(n) => Err(error!(LiteralNotAllowed; n.to_string())),
    }
}

fn name(op: Option<&Operand>) -> Result<&Rc<str>> {
    Ok(&reference(op)?.name)
}
