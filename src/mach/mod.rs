/*!
## Rust Machine Module

This Rust module compiles gnalose listings and runs them, bottom line first.

*/

pub type Address = usize;

mod instruction;
mod link;
mod listing;
mod opcode;
mod program;
mod runtime;
mod stack;
mod var;

pub use instruction::Instruction;
pub use link::Link;
pub use listing::Listing;
pub use opcode::Opcode;
pub use program::Program;
pub use runtime::Event;
pub use runtime::Runtime;
pub use stack::Stack;
pub use var::Cell;
pub use var::Var;
pub use var::MAX_ARRAY_LEN;
