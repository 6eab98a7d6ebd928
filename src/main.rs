//! # gnalose
//!
//! Command line interpreter. Runs a gnalose source file, bottom line first.
//!

mod term;

fn main() {
    std::process::exit(term::main());
}
