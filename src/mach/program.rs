use super::{Address, Instruction, Link, Listing};
use crate::lang::{parse, Error};

type Result<T> = std::result::Result<T, Error>;

/// ## Compiled program
///
/// Instructions are stored in execution order, which is the reverse of the
/// source order. Built once and read-only afterwards.

#[derive(Debug, Clone, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    link: Link,
    line_count: usize,
}

impl Program {
    pub fn compile(source: &str) -> Result<Program> {
        let listing = Listing::load_str(source)?;
        let mut instructions = vec![];
        for line in listing.lines().iter().rev() {
            if let Some(statement) = parse(line)? {
                instructions.push(Instruction::new(statement, line.clone()));
            }
        }
        let link = Link::build(&instructions)?;
        log::debug!(
            "compiled {} lines into {} instructions",
            listing.len(),
            instructions.len()
        );
        Ok(Program {
            instructions,
            link,
            line_count: listing.len(),
        })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, addr: Address) -> Option<&Instruction> {
        self.instructions.get(addr)
    }

    pub fn jump_target(&self, addr: Address) -> Option<Address> {
        self.link.target(addr)
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Number of lines in the source, blank ones included.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, instruction) in self.instructions.iter().enumerate() {
            let code = match self.link.target(addr) {
                Some(target) => format!("{} -> {}", instruction, target),
                None => instruction.to_string(),
            };
            let line = instruction.line();
            writeln!(
                f,
                "{:>5}  {:<32} ; {}:{} {}",
                addr,
                code,
                line.number(),
                line.from_bottom(),
                line.text().trim()
            )?;
        }
        Ok(())
    }
}
