//! Parser Types and Constants
//!
//! Shared limits, character classes and the error type used across parser
//! modules.

use thiserror::Error;

/// Max recursion depth for nested constructs (subshells, substitutions,
/// expansions, compound statements).
pub const MAX_PARSER_DEPTH: usize = 64;

/// Errors the parser records while producing a best-effort tree.
///
/// `parse` never returns these; they are reported through
/// [`Parser::error`](crate::parser::Parser::error) and [`try_parse`](crate::parser::try_parse).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Maximum nesting depth of {limit} exceeded at offset {offset}")]
    DepthExceeded { limit: usize, offset: usize },
}

/// Characters that end an unquoted word.
pub fn is_metachar(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b';' | b'&' | b'|' | b'<' | b'>' | b'(' | b')')
}

pub fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t')
}

pub fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Single-character special parameters: `$@`, `$*`, `$#`, `$?`, `$$`, `$!`,
/// `$-` and the positional `$0`..`$9`.
pub fn is_special_parameter(b: u8) -> bool {
    matches!(b, b'@' | b'*' | b'#' | b'?' | b'$' | b'!' | b'-') || b.is_ascii_digit()
}
