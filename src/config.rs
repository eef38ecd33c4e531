//! Alias Sources
//!
//! Aliases are always supplied by the caller. This module reads them from the
//! two places they usually live: a TOML file with an `[aliases]` table, and
//! the output of the shell's `alias` builtin (`alias ll='ls -la'` lines).
//!
//! Every value is normalized once here, so an `AliasMap` always holds the
//! text an alias expands to.

use crate::ast::types::{Node, NodeKind};
use crate::command::types::AliasMap;
use crate::parser::parse;
use log::debug;
use regex_lite::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

lazy_static::lazy_static! {
    /// `[alias ]name=value`
    static ref ALIAS_LINE: Option<Regex> = Regex::new(r"^\s*(?:alias\s+)?([^\s=]+)=(.*)$").ok();
}

/// Characters that can never appear in an alias name.
const INVALID_NAME_CHARS: &str = "/$`'\"\\;&|<>()";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid alias file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("line {line}: {message}")]
    InvalidAlias { line: usize, message: String },
}

#[derive(Debug, Default, Deserialize)]
struct AliasFile {
    #[serde(default)]
    aliases: AliasMap,
}

/// Aliases from the `[aliases]` table of a TOML document. A document without
/// the table yields no aliases.
pub fn parse_alias_toml(text: &str) -> Result<AliasMap, toml::de::Error> {
    let file: AliasFile = toml::from_str(text)?;
    Ok(file
        .aliases
        .into_iter()
        .map(|(name, value)| {
            let value = normalize_alias_value(&value);
            (name, value)
        })
        .collect())
}

pub fn load_alias_file(path: &Path) -> Result<AliasMap, ConfigError> {
    let text = read(path)?;
    let aliases = parse_alias_toml(&text).map_err(|source| ConfigError::Toml {
        path: path.display().to_string(),
        source,
    })?;
    debug!(
        "config event=load_toml path={} aliases={}",
        path.display(),
        aliases.len()
    );
    Ok(aliases)
}

/// Aliases from `alias` builtin output or a shell rc fragment. Blank lines
/// and `#` comments are skipped; any other line must define an alias.
pub fn parse_alias_definitions(text: &str) -> Result<AliasMap, ConfigError> {
    let mut aliases = AliasMap::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, value) = parse_definition(line, idx + 1)?;
        aliases.insert(name, value);
    }
    Ok(aliases)
}

pub fn load_alias_definitions(path: &Path) -> Result<AliasMap, ConfigError> {
    let text = read(path)?;
    let aliases = parse_alias_definitions(&text)?;
    debug!(
        "config event=load_definitions path={} aliases={}",
        path.display(),
        aliases.len()
    );
    Ok(aliases)
}

/// `NAME=VALUE` as given on the command line.
pub fn parse_alias_arg(arg: &str) -> Result<(String, String), ConfigError> {
    parse_definition(arg, 1)
}

fn parse_definition(line: &str, line_number: usize) -> Result<(String, String), ConfigError> {
    let invalid = |message: String| ConfigError::InvalidAlias {
        line: line_number,
        message,
    };
    let captures = ALIAS_LINE
        .as_ref()
        .and_then(|re| re.captures(line))
        .ok_or_else(|| invalid(format!("expected name=value, got '{line}'")))?;

    let name = captures.get(1).map_or("", |m| m.as_str());
    if name.chars().any(|c| INVALID_NAME_CHARS.contains(c)) {
        return Err(invalid(format!("invalid alias name '{name}'")));
    }
    let value = captures.get(2).map_or("", |m| m.as_str());
    Ok((name.to_string(), normalize_alias_value(value)))
}

/// Turn a raw alias value into the text it expands to.
///
/// A value that is one fully quoted shell word (`'ls -la'`, `"git status"`,
/// `'it'\''s'`) loses its quoting. Literal `\n` sequences in unquoted words
/// become newlines; quoted text and expansions are left alone.
pub fn normalize_alias_value(value: &str) -> String {
    let program = parse(value);
    let unquoted = match program.children.as_slice() {
        [statement] => quoted_word_value(statement, value.len()),
        _ => None,
    };
    match unquoted {
        Some(text) => expand_newline_escapes(&text),
        None => expand_newline_escapes(value),
    }
}

/// Unquoted value of a statement that is a single quoted word spanning the
/// whole buffer.
fn quoted_word_value(statement: &Node, len: usize) -> Option<String> {
    let [word] = statement.children.as_slice() else {
        return None;
    };
    if statement.kind != NodeKind::Command || word.span() != (0..len) {
        return None;
    }
    let pieces = match word.kind {
        NodeKind::String | NodeKind::RawString => std::slice::from_ref(word),
        NodeKind::Concatenation => word.children.as_slice(),
        _ => return None,
    };
    let quoted = |n: &Node| matches!(n.kind, NodeKind::String | NodeKind::RawString);
    let all_literal = pieces
        .iter()
        .all(|n| n.complete && (quoted(n) || n.kind == NodeKind::Word));
    (all_literal && pieces.iter().any(quoted)).then(|| word.inner_text.clone())
}

fn expand_newline_escapes(text: &str) -> String {
    let tree = parse(text);
    let mut words = Vec::new();
    collect_unquoted_words(&tree, &mut words);
    if words.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for word in words {
        out.push_str(&text[cursor..word.start_index]);
        let mut chars = word.text.chars();
        while let Some(c) = chars.next() {
            match (c, chars.clone().next()) {
                ('\\', Some('n')) => {
                    chars.next();
                    out.push('\n');
                }
                ('\\', Some(escaped)) => {
                    chars.next();
                    out.push(c);
                    out.push(escaped);
                }
                _ => out.push(c),
            }
        }
        cursor = word.end_index;
    }
    out.push_str(&text[cursor..]);
    out
}

/// `Word` nodes outside any quotes or expansions, in source order.
fn collect_unquoted_words<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    match node.kind {
        NodeKind::Word => out.push(node),
        NodeKind::Program
        | NodeKind::List(_)
        | NodeKind::Pipeline(_)
        | NodeKind::Subshell
        | NodeKind::CompoundStatement
        | NodeKind::Command
        | NodeKind::AssignmentList { .. }
        | NodeKind::Assignment(_)
        | NodeKind::Redirect(_)
        | NodeKind::Concatenation => {
            for child in &node.children {
                collect_unquoted_words(child, out);
            }
        }
        _ => {}
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}
