/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of gnalose source lines.

*/

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use error::Phase;
pub use lex::lex;
pub use line::Line;
pub use parse::grammar;
pub use parse::parse;
pub use token::Token;

pub mod ast;
