//! Query Entry Points
//!
//! Parse a buffer, pick the command(s) of interest and expand aliases.

use crate::command::alias_expansion::expand_command;
use crate::command::errors::QueryError;
use crate::command::segmenter::get_top_level_commands;
use crate::command::types::{AliasMap, Command};
use crate::parser::parse;
use log::debug;

/// The alias-expanded command under `cursor_index`.
///
/// Without a cursor, or with one past the end of the buffer, the last command
/// is used. A cursor between commands picks the nearest command before it.
/// Returns `Ok(None)` when the buffer holds no command at all. A failed
/// expansion hands back the unexpanded command inside `QueryError::Expand`.
pub fn get_command(
    buffer: &str,
    aliases: &AliasMap,
    cursor_index: Option<usize>,
) -> Result<Option<Command>, QueryError> {
    let commands = get_top_level_commands(&parse(buffer))?;
    let cursor = cursor_index.filter(|&index| index <= buffer.len());
    let Some(command) = select_command(commands, cursor) else {
        return Ok(None);
    };
    debug!(
        "query event=select cursor={:?} start={} end={}",
        cursor, command.original_tree.start_index, command.original_tree.end_index
    );
    expand(command, cursor, aliases).map(Some)
}

/// Every command of `buffer`, alias-expanded, in source order.
pub fn get_all_commands_with_alias(
    buffer: &str,
    aliases: &AliasMap,
) -> Result<Vec<Command>, QueryError> {
    get_top_level_commands(&parse(buffer))?
        .into_iter()
        .map(|command| expand(command, None, aliases))
        .collect()
}

fn expand(
    command: Command,
    cursor: Option<usize>,
    aliases: &AliasMap,
) -> Result<Command, QueryError> {
    expand_command(&command, cursor, aliases).map_err(|source| QueryError::Expand {
        command: Box::new(command),
        source,
    })
}

fn select_command(commands: Vec<Command>, cursor: Option<usize>) -> Option<Command> {
    let Some(cursor) = cursor else {
        return commands.into_iter().last();
    };
    let position = commands
        .iter()
        .position(|c| c.original_tree.contains(cursor))
        .or_else(|| {
            commands
                .iter()
                .rposition(|c| c.original_tree.end_index <= cursor)
        })
        .unwrap_or(0);
    commands.into_iter().nth(position)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(pairs: &[(&str, &str)]) -> AliasMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn name_at(buffer: &str, cursor: Option<usize>) -> Option<String> {
        get_command(buffer, &AliasMap::new(), cursor)
            .unwrap()
            .and_then(|c| c.name().map(|t| t.text.clone()))
    }

    #[test]
    fn test_empty_buffers() {
        let map = AliasMap::new();
        assert!(get_command("", &map, None).unwrap().is_none());
        assert!(get_command("   ", &map, Some(1)).unwrap().is_none());
        assert!(get_command(";;\n", &map, None).unwrap().is_none());
        assert!(get_all_commands_with_alias(" ", &map).unwrap().is_empty());
    }

    #[test]
    fn test_cursor_selection() {
        let buffer = "cd src; make all;  git status";
        assert_eq!(name_at(buffer, Some(0)).as_deref(), Some("cd"));
        assert_eq!(name_at(buffer, Some(6)).as_deref(), Some("cd"));
        assert_eq!(name_at(buffer, Some(9)).as_deref(), Some("make"));
        // Gap after "make all;" belongs to the preceding command
        assert_eq!(name_at(buffer, Some(18)).as_deref(), Some("make"));
        assert_eq!(name_at(buffer, Some(19)).as_deref(), Some("git"));
        assert_eq!(name_at(buffer, None).as_deref(), Some("git"));
    }

    #[test]
    fn test_cursor_before_first_command() {
        assert_eq!(name_at("   ls", Some(1)).as_deref(), Some("ls"));
    }

    #[test]
    fn test_cursor_past_end_clamps_to_last() {
        let buffer = "echo a && echo b; pwd";
        let map = AliasMap::new();
        let clamped = get_command(buffer, &map, Some(10_000)).unwrap();
        let omitted = get_command(buffer, &map, None).unwrap();
        assert_eq!(clamped, omitted);
        assert_eq!(clamped.unwrap().tree.text, "pwd");
    }

    #[test]
    fn test_get_command_expands_alias() {
        let map = aliases(&[("ll", "ls -la")]);
        let command = get_command("ll /tmp", &map, None).unwrap().unwrap();
        let texts: Vec<_> = command.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["ls", "-la", "/tmp"]);
    }

    #[test]
    fn test_get_all_commands_with_alias() {
        let map = aliases(&[("g", "git"), ("l", "ls -1")]);
        let commands = get_all_commands_with_alias("g status; l | wc -l; echo l", &map).unwrap();
        let names: Vec<_> = commands
            .iter()
            .map(|c| c.tree.text.as_str())
            .collect();
        assert_eq!(names, vec!["git status", "ls -1 | wc -l", "echo l"]);
        assert_eq!(commands[1].original_tree.text, "l | wc -l");
    }
}
