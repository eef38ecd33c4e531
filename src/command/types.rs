//! Command and Token Types

use crate::ast::types::Node;
use serde::Serialize;
use std::collections::HashMap;

/// Alias name to raw replacement text. Always supplied by the caller.
pub type AliasMap = HashMap<String, String>;

/// Positional view of one argument node of a command.
///
/// `node` lives in the (possibly alias-substituted) tree; `original_node` is
/// the node in the text the user actually typed that this token came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub node: Node,
    pub original_node: Node,
}

impl Token {
    /// Identity token: the node maps to itself.
    pub fn from_node(node: &Node) -> Self {
        Token {
            text: node.text.clone(),
            node: node.clone(),
            original_node: node.clone(),
        }
    }
}

/// One independently completable unit of a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    pub tokens: Vec<Token>,
    pub tree: Node,
    pub original_tree: Node,
}

impl Command {
    /// The command-name token, if any.
    pub fn name(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// Index of the token whose original node contains `index` (an offset
    /// into the typed buffer), end inclusive.
    pub fn token_index_at(&self, index: usize) -> Option<usize> {
        self.tokens
            .iter()
            .rposition(|token| token.original_node.contains(index))
    }

    /// Whether any alias substitution changed this command.
    pub fn is_substituted(&self) -> bool {
        self.tree != self.original_tree
    }
}

#[cfg(test)]
mod tests {
    use crate::command::segmenter::get_top_level_commands;
    use crate::parser::parse;

    #[test]
    fn test_token_index_at() {
        let commands = get_top_level_commands(&parse("git commit -m")).unwrap();
        let cmd = &commands[0];
        assert_eq!(cmd.name().map(|t| t.text.as_str()), Some("git"));
        assert_eq!(cmd.token_index_at(0), Some(0));
        assert_eq!(cmd.token_index_at(3), Some(0));
        assert_eq!(cmd.token_index_at(4), Some(1));
        assert_eq!(cmd.token_index_at(13), Some(2));
        assert!(!cmd.is_substituted());
    }
}
