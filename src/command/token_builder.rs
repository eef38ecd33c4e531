//! Token Builder
//!
//! Flattens a statement subtree into the ordered argument tokens of a
//! command. Operators, redirections and assignments are structure, not
//! tokens.

use crate::ast::types::{Node, NodeKind};
use crate::command::errors::ConvertCommandError;
use crate::command::types::{Command, Token};

/// Tokens of `tree` in document order.
///
/// Descends through lists, pipelines, subshells and compound statements;
/// an `AssignmentList` contributes the tokens of its trailing command only.
pub fn flatten_tokens(tree: &Node) -> Result<Vec<Token>, ConvertCommandError> {
    let mut tokens = Vec::new();
    collect_tokens(tree, &mut tokens)?;
    Ok(tokens)
}

fn collect_tokens(node: &Node, tokens: &mut Vec<Token>) -> Result<(), ConvertCommandError> {
    match node.kind {
        NodeKind::Program
        | NodeKind::List(_)
        | NodeKind::Pipeline(_)
        | NodeKind::Subshell
        | NodeKind::CompoundStatement => {
            for child in &node.children {
                collect_tokens(child, tokens)?;
            }
        }
        NodeKind::AssignmentList { has_command } => {
            let ends_with_command = node
                .children
                .last()
                .is_some_and(|child| child.kind == NodeKind::Command);
            if has_command != ends_with_command {
                return Err(ConvertCommandError::InconsistentAssignmentList {
                    has_command,
                    start: node.start_index,
                    end: node.end_index,
                });
            }
            if let (true, Some(command)) = (has_command, node.children.last()) {
                collect_tokens(command, tokens)?;
            }
        }
        NodeKind::Command => {
            tokens.extend(
                node.children
                    .iter()
                    .filter(|child| child.kind.is_argument())
                    .map(Token::from_node),
            );
        }
        NodeKind::Assignment(_)
        | NodeKind::VariableName
        | NodeKind::Subscript
        | NodeKind::Redirect(_)
        | NodeKind::Word
        | NodeKind::String
        | NodeKind::RawString
        | NodeKind::AnsiCString
        | NodeKind::CommandSubstitution
        | NodeKind::ProcessSubstitution
        | NodeKind::SimpleExpansion
        | NodeKind::SpecialExpansion
        | NodeKind::ParameterExpansion
        | NodeKind::ArithmeticExpansion
        | NodeKind::Concatenation => {}
    }
    Ok(())
}

/// Build a `Word` token for `text` at `index`, an offset into the buffer the
/// user typed (the space of `command.original_tree`).
///
/// The token's node is placed in the substituted buffer by carrying over the
/// offset drift of the nearest token that ends at or before `index` (or of
/// the first token, or of the tree end when there are no tokens). The node's
/// span is in the substituted buffer and covers `text.len()` bytes. Without an
/// `original_node` the token maps to itself.
pub fn create_text_token(
    command: &Command,
    index: usize,
    text: &str,
    original_node: Option<Node>,
) -> Token {
    let (substituted, original) = match command
        .tokens
        .iter()
        .rev()
        .find(|token| token.original_node.end_index <= index)
    {
        Some(token) => (token.node.end_index, token.original_node.end_index),
        None => match command.tokens.first() {
            Some(token) => (token.node.start_index, token.original_node.start_index),
            None => (command.tree.end_index, command.original_tree.end_index),
        },
    };
    let start = (index + substituted).saturating_sub(original);

    let node = Node::word(text, start);
    Token {
        text: text.to_string(),
        original_node: original_node.unwrap_or_else(|| node.clone()),
        node,
    }
}
