//! Alias Expansion
//!
//! Rewrites the command name of a `Command` with its alias value and
//! reparses, keeping every token mapped back to the text the user typed.
//!
//! Alias expansion rules:
//! 1. Only a command name that is a plain unquoted word expands
//! 2. The alias value replaces the command name in the command text
//! 3. Expansion repeats on the new command name, but a name never expands
//!    twice along one chain

use crate::ast::types::{NodeKind, AST};
use crate::command::errors::SubstituteAliasError;
use crate::command::token_builder::{create_text_token, flatten_tokens};
use crate::command::types::{AliasMap, Command, Token};
use crate::parser::parse;
use log::debug;
use std::collections::HashSet;

/// Replace `token` in `command` with `alias_text` and rebuild the command.
///
/// `token` must be one of `command.tokens` and its text must still match the
/// command text at its span. Tokens before and after the replaced span keep
/// their previous `original_node`; tokens produced by the alias text map to
/// `token.original_node`.
pub fn substitute_alias(
    command: &Command,
    token: &Token,
    alias_text: &str,
) -> Result<Command, SubstituteAliasError> {
    let tree = &command.tree;
    let span = token.node.span();
    if span.start < tree.start_index || span.end > tree.end_index {
        return Err(SubstituteAliasError::OutOfRange {
            start: span.start,
            end: span.end,
            tree_start: tree.start_index,
            tree_end: tree.end_index,
        });
    }

    let relative = span.start - tree.start_index..span.end - tree.start_index;
    let found = tree.text.get(relative.clone());
    if found != Some(token.node.text.as_str()) {
        return Err(SubstituteAliasError::TextMismatch {
            start: span.start,
            end: span.end,
            expected: token.node.text.clone(),
            found: found.unwrap_or_default().to_string(),
        });
    }
    if !command.tokens.iter().any(|t| t.node == token.node) {
        return Err(SubstituteAliasError::UnknownToken {
            text: token.text.clone(),
            start: span.start,
            end: span.end,
        });
    }

    let mut text = String::with_capacity(tree.text.len() + alias_text.len());
    text.push_str(&tree.text[..relative.start]);
    text.push_str(alias_text);
    text.push_str(&tree.text[relative.end..]);

    // An alias value containing separators splits the text; the statement
    // holding the original arguments is the last one.
    let new_tree = parse(&text)
        .children
        .pop()
        .unwrap_or_else(|| AST::node(NodeKind::Command, "", 0, 0, true, Vec::new()))
        .shift_by(tree.start_index);

    let alias_end = span.start + alias_text.len();
    let delta = alias_text.len() as isize - span.len() as isize;
    let mut tokens: Vec<Token> = flatten_tokens(&new_tree)?
        .into_iter()
        .map(|mut new_token| {
            let (start, end) = (new_token.node.start_index, new_token.node.end_index);
            let previous = if end <= span.start && start < span.start {
                command.tokens.iter().find(|t| t.node.start_index == start)
            } else if start >= alias_end {
                start.checked_add_signed(-delta).and_then(|old_start| {
                    command.tokens.iter().find(|t| t.node.start_index == old_start)
                })
            } else {
                None
            };
            new_token.original_node = previous
                .unwrap_or(token)
                .original_node
                .clone();
            new_token
        })
        .collect();

    let mut substituted = Command {
        tokens: Vec::new(),
        tree: new_tree,
        original_tree: command.original_tree.clone(),
    };

    // A trailing empty token sits past the tree; carry it over
    if let Some(last) = command
        .tokens
        .last()
        .filter(|t| t.text.is_empty() && t.node.start_index >= tree.end_index)
    {
        substituted.tokens = tokens.clone();
        let index = last.original_node.start_index;
        tokens.push(create_text_token(
            &substituted,
            index,
            "",
            Some(last.original_node.clone()),
        ));
    }
    substituted.tokens = tokens;

    debug!(
        "alias event=substitute name={} at={} delta={} tokens={}",
        token.text,
        span.start,
        delta,
        substituted.tokens.len()
    );
    Ok(substituted)
}

/// Expand the command name of `command` through `aliases` until it is no
/// longer an alias, or an alias name repeats.
///
/// `_cursor_index` is accepted so callers can pass the cursor through; the
/// whole command expands regardless of where it is.
pub fn expand_command(
    command: &Command,
    _cursor_index: Option<usize>,
    aliases: &AliasMap,
) -> Result<Command, SubstituteAliasError> {
    let mut current = command.clone();
    let mut seen: HashSet<String> = HashSet::new();

    while let Some(name) = current.tokens.first().cloned() {
        if name.node.kind != NodeKind::Word {
            break;
        }
        let Some(value) = aliases.get(&name.text) else {
            break;
        };
        if !seen.insert(name.text.clone()) {
            debug!("alias event=cycle name={} depth={}", name.text, seen.len());
            break;
        }
        current = substitute_alias(&current, &name, value)?;
    }

    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::segmenter::get_top_level_commands;

    fn first_command(buffer: &str) -> Command {
        get_top_level_commands(&parse(buffer))
            .unwrap()
            .into_iter()
            .next()
            .unwrap()
    }

    fn aliases(pairs: &[(&str, &str)]) -> AliasMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn texts(command: &Command) -> Vec<&str> {
        command.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_substitute_alias_maps_original_nodes() {
        let command = first_command("ll /tmp");
        let token = command.tokens[0].clone();
        let result = substitute_alias(&command, &token, "ls -la").unwrap();

        assert_eq!(texts(&result), vec!["ls", "-la", "/tmp"]);
        assert_eq!(result.tree.text, "ls -la /tmp");
        assert_eq!(result.original_tree.text, "ll /tmp");
        assert_eq!(result.tokens[0].original_node.span(), 0..2);
        assert_eq!(result.tokens[1].original_node.span(), 0..2);
        assert_eq!(result.tokens[2].node.span(), 7..11);
        assert_eq!(result.tokens[2].original_node.span(), 3..7);
        assert!(result.is_substituted());
    }

    #[test]
    fn test_substitute_alias_keeps_offsets_of_later_statements() {
        let buffer = "echo hi; g push";
        let command = get_top_level_commands(&parse(buffer)).unwrap().remove(1);
        let token = command.tokens[0].clone();
        let result = substitute_alias(&command, &token, "git").unwrap();
        assert_eq!(result.tree.span(), 9..17);
        assert_eq!(result.tokens[1].node.span(), 13..17);
        assert_eq!(result.tokens[1].original_node.span(), 11..15);
    }

    #[test]
    fn test_substitute_alias_in_pipeline() {
        let command = first_command("gl | head");
        let token = command.tokens[0].clone();
        let result = substitute_alias(&command, &token, "git log --oneline").unwrap();
        assert_eq!(texts(&result), vec!["git", "log", "--oneline", "head"]);
        assert_eq!(result.tokens[3].original_node.span(), 5..9);
    }

    #[test]
    fn test_substitute_alias_with_separator() {
        let command = first_command("up x");
        let token = command.tokens[0].clone();
        let result = substitute_alias(&command, &token, "cd ..; ls").unwrap();
        assert_eq!(texts(&result), vec!["ls", "x"]);
        assert_eq!(result.tree.span(), 7..11);
        assert_eq!(result.tokens[1].original_node.span(), 3..4);
    }

    #[test]
    fn test_substitute_alias_to_nothing() {
        let command = first_command("nop");
        let token = command.tokens[0].clone();
        let result = substitute_alias(&command, &token, "").unwrap();
        assert!(result.tokens.is_empty());
        assert_eq!(result.tree.kind, NodeKind::Command);
        assert_eq!(result.tree.span(), 0..0);
    }

    #[test]
    fn test_substitute_alias_carries_trailing_token() {
        let command = first_command("ll /tmp ");
        assert_eq!(command.tokens.len(), 3);
        let token = command.tokens[0].clone();
        let result = substitute_alias(&command, &token, "ls -la").unwrap();
        let last = result.tokens.last().unwrap();
        assert_eq!(last.text, "");
        assert_eq!(last.node.span(), 12..12);
        assert_eq!(last.original_node.span(), 8..8);
    }

    #[test]
    fn test_stale_token_is_rejected() {
        let command = first_command("ll /tmp");
        let mut token = command.tokens[0].clone();
        token.node.text = "la".to_string();
        let err = substitute_alias(&command, &token, "ls -la").unwrap_err();
        assert!(matches!(err, SubstituteAliasError::TextMismatch { .. }));

        let mut token = command.tokens[1].clone();
        token.node = token.node.shift_by(10);
        let err = substitute_alias(&command, &token, "x").unwrap_err();
        assert!(matches!(err, SubstituteAliasError::OutOfRange { .. }));
    }

    #[test]
    fn test_foreign_token_is_rejected() {
        let command = first_command("echo $(ls)");
        let inner = command.tokens[1].node.children[0].children[0].clone();
        let token = Token::from_node(&inner);
        let err = substitute_alias(&command, &token, "dir").unwrap_err();
        assert!(matches!(err, SubstituteAliasError::UnknownToken { .. }));
    }

    #[test]
    fn test_expand_command_chain() {
        let map = aliases(&[("ll", "la -l"), ("la", "ls -a")]);
        let command = first_command("ll src");
        let result = expand_command(&command, None, &map).unwrap();
        assert_eq!(texts(&result), vec!["ls", "-a", "-l", "src"]);
        for token in &result.tokens[..3] {
            assert_eq!(token.original_node.text, "ll");
        }
        assert_eq!(result.tokens[3].original_node.span(), 3..6);
    }

    #[test]
    fn test_expand_command_cycle_terminates() {
        let map = aliases(&[("a", "b"), ("b", "a")]);
        let command = first_command("a x");
        let result = expand_command(&command, None, &map).unwrap();
        assert_eq!(texts(&result), vec!["a", "x"]);
        assert_eq!(result.tokens[0].original_node.span(), 0..1);
    }

    #[test]
    fn test_self_referencing_alias_expands_once() {
        let map = aliases(&[("ls", "ls --color")]);
        let result = expand_command(&first_command("ls"), Some(2), &map).unwrap();
        assert_eq!(texts(&result), vec!["ls", "--color"]);
    }

    #[test]
    fn test_quoted_name_does_not_expand() {
        let map = aliases(&[("ll", "ls -la")]);
        for buffer in ["'ll'", "\"ll\"", "\\ll"] {
            let command = first_command(buffer);
            let result = expand_command(&command, None, &map).unwrap();
            assert_eq!(result, command, "{buffer}");
        }
    }

    #[test]
    fn test_alias_value_is_used_verbatim() {
        let map = aliases(&[("q", "\"git\" \"status\""), ("p", "printf '%s\\n'")]);
        let result = expand_command(&first_command("q x"), None, &map).unwrap();
        assert_eq!(texts(&result), vec!["\"git\"", "\"status\"", "x"]);

        let result = expand_command(&first_command("p x"), None, &map).unwrap();
        assert_eq!(texts(&result), vec!["printf", "'%s\\n'", "x"]);
        assert_eq!(result.tokens[1].node.kind, NodeKind::RawString);
    }

    #[test]
    fn test_no_alias_is_identity() {
        let command = first_command("git status");
        let result = expand_command(&command, None, &AliasMap::new()).unwrap();
        assert_eq!(result, command);
    }
}
