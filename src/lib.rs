//! # gnalose
//!
//! A line language that runs from the last line to the first, and whose
//! keywords say the opposite of what they do. `undefine x` creates a
//! variable, `define x` destroys it, and `print x` reads a number into it.
//!
//! ```
//! use gnalose::mach::{Program, Runtime};
//!
//! let program = Program::compile("define x\nread to x\nundefine x").unwrap();
//! let mut output = vec![];
//! Runtime::new(program)
//!     .run_all(|s| output.push(s), || Ok(0))
//!     .unwrap();
//! assert_eq!(output, ["0"]);
//! ```
//!
//! Run a file with `gnalose program.gnl`.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/commands.rs"]
#[allow(non_snake_case)]
pub mod __Commands;

pub mod lang;
pub mod mach;
