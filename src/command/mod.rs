//! Commands built from parsed buffers
//!
//! Segments a tree into top-level commands, flattens them into tokens and
//! applies alias substitution while tracking what the user actually typed.

pub mod alias_expansion;
pub mod errors;
pub mod query;
pub mod segmenter;
pub mod token_builder;
pub mod types;

pub use alias_expansion::{expand_command, substitute_alias};
pub use errors::{ConvertCommandError, QueryError, SubstituteAliasError};
pub use query::{get_all_commands_with_alias, get_command};
pub use segmenter::{convert_command, get_top_level_commands};
pub use token_builder::{create_text_token, flatten_tokens};
pub use types::{AliasMap, Command, Token};
