//! AST module for shell command lines
//!
//! Node types produced by the parser, plus a debug tree printer.

pub mod printer;
pub mod types;

pub use printer::format_tree;
pub use types::*;
