use super::{Address, Instruction, Opcode, Stack};
use crate::lang::{Error, ErrorCode, Phase};
use std::collections::BTreeMap;

type Result<T> = std::result::Result<T, Error>;

/// ## Block links
///
/// Pairs every conditional with the `EndIf` that closes it. Built once per
/// program by a single pass over the reversed instruction sequence.

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Link {
    targets: BTreeMap<Address, Address>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn build(instructions: &[Instruction]) -> Result<Link> {
        let mut link = Link::new();
        let mut open: Stack<Address> =
            Stack::new(ErrorCode::InternalError, "ENDIF WITHOUT CONDITIONAL");
        for (addr, instruction) in instructions.iter().enumerate() {
            let result = if instruction.opcode().is_conditional() {
                open.push(addr)
            } else if instruction.opcode() == Opcode::EndIf {
                open.pop().map(|start| link.insert(start, addr))
            } else {
                Ok(())
            };
            if let Err(e) = result {
                return Err(e.in_line(instruction.line()).in_phase(Phase::Linking));
            }
        }
        if let Ok(start) = open.pop() {
            return Err(Error::new(ErrorCode::InternalError)
                .message("CONDITIONAL WITHOUT ENDIF")
                .in_line(instructions[start].line())
                .in_phase(Phase::Linking));
        }
        log::debug!("linked {} blocks", link.len());
        Ok(link)
    }

    pub fn insert(&mut self, conditional: Address, end: Address) {
        debug_assert!(conditional < end);
        self.targets.insert(conditional, end);
    }

    /// Address of the `EndIf` closing the conditional at `conditional`.
    pub fn target(&self, conditional: Address) -> Option<Address> {
        self.targets.get(&conditional).copied()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Address, Address)> + '_ {
        self.targets.iter().map(|(k, v)| (*k, *v))
    }
}
