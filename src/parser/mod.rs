//! Parser module for shell command lines
//!
//! A single recursive-descent pass over the buffer text produces the tree;
//! there is no separate token stream, so spans always index the buffer.

pub mod types;
pub mod parser;
mod compound_parser;
mod expansion_parser;
mod word_parser;

// Re-exports
pub use parser::{parse, try_parse, Parser};
pub use types::{ParseError, MAX_PARSER_DEPTH};
pub use word_parser::decode_ansi_c;
