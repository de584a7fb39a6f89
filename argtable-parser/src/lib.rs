//! Lexer and look-up table for legacy `-flag=value` command lines.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

extern crate alloc;

pub mod lexer;
pub mod parser;
pub mod utils;

pub use lexer::{Flag, IntoTokens, Token, Tokens};
pub use parser::{ArgTable, Error, ParseOptions};
