//! Command Segmenter
//!
//! Splits a parsed buffer into its top-level commands: one `Command` per
//! statement directly under the root. Lists and pipelines stay whole, since
//! completion works per stage through the cursor position inside the unit.

use crate::ast::types::{create_text_node, Node, NodeKind};
use crate::command::errors::ConvertCommandError;
use crate::command::token_builder::{create_text_token, flatten_tokens};
use crate::command::types::Command;
use log::trace;
use std::slice;

/// Convert one statement subtree into an unsubstituted `Command`.
pub fn convert_command(statement: &Node) -> Result<Command, ConvertCommandError> {
    match statement.kind {
        NodeKind::List(_)
        | NodeKind::Pipeline(_)
        | NodeKind::Subshell
        | NodeKind::CompoundStatement
        | NodeKind::Command
        | NodeKind::AssignmentList { .. } => {}
        kind => {
            return Err(ConvertCommandError::NotAStatement {
                kind,
                start: statement.start_index,
                end: statement.end_index,
            })
        }
    }

    Ok(Command {
        tokens: flatten_tokens(statement)?,
        tree: statement.clone(),
        original_tree: statement.clone(),
    })
}

/// Top-level commands of `tree`, in source order.
///
/// `tree` is normally the `Program` root from [`parse`](crate::parser::parse),
/// whose text is the whole buffer. When the buffer ends in blanks after the
/// last command, that command gets a trailing empty token at the buffer end
/// so callers can tell a new argument has been started.
pub fn get_top_level_commands(tree: &Node) -> Result<Vec<Command>, ConvertCommandError> {
    let statements = match tree.kind {
        NodeKind::Program => tree.children.as_slice(),
        _ => slice::from_ref(tree),
    };
    let mut commands = statements
        .iter()
        .map(convert_command)
        .collect::<Result<Vec<_>, _>>()?;

    if tree.kind == NodeKind::Program {
        if let Some(last) = commands.last_mut() {
            append_trailing_token(last, &tree.text);
        }
    }

    trace!(
        "segment event=done statements={} commands={}",
        statements.len(),
        commands.len()
    );
    Ok(commands)
}

fn append_trailing_token(command: &mut Command, buffer: &str) {
    let Some(rest) = buffer.get(command.tree.end_index..) else {
        return;
    };
    if rest.is_empty() || !rest.bytes().all(|b| b == b' ' || b == b'\t') {
        return;
    }
    let index = buffer.len();
    let original = create_text_node("", index, buffer);
    let token = create_text_token(command, index, "", Some(original));
    command.tokens.push(token);
}
