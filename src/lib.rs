//! shparse - shell command-line parsing for autocomplete
//!
//! This library parses the line a user is typing into a syntax tree that
//! tolerates unfinished input, splits it into top-level commands and expands
//! aliases while keeping every token mapped to the text that was typed.
//!
//! ```
//! use shparse::{get_command, AliasMap};
//!
//! let mut aliases = AliasMap::new();
//! aliases.insert("ll".to_string(), "ls -la".to_string());
//!
//! let command = get_command("ll /tmp", &aliases, None).unwrap().unwrap();
//! let tokens: Vec<_> = command.tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(tokens, ["ls", "-la", "/tmp"]);
//! assert_eq!(command.tokens[0].original_node.text, "ll");
//! ```

pub mod ast;
pub mod command;
pub mod config;
pub mod parser;

pub use ast::types::*;
pub use ast::format_tree;
pub use command::{
    convert_command, create_text_token, expand_command, get_all_commands_with_alias,
    get_command, get_top_level_commands, substitute_alias, AliasMap, Command,
    ConvertCommandError, QueryError, SubstituteAliasError, Token,
};
pub use config::{normalize_alias_value, ConfigError};
pub use parser::{parse, try_parse, ParseError, Parser, MAX_PARSER_DEPTH};
