//! Compound Command Parser
//!
//! Handles parsing of subshells `( ... )` and compound statements `{ ...; }`.
//! Control-flow keywords (`if`, `for`, `case`, ...) are not modeled; they
//! parse as ordinary words.

use crate::ast::types::{Node, NodeKind};
use crate::parser::parser::Parser;

impl Parser {
    /// Parse a subshell: `( statements )`
    pub(super) fn parse_subshell(&mut self) -> Node {
        let start = self.pos;
        if !self.enter() {
            return self.truncated(NodeKind::Subshell, start);
        }
        self.bump(1);
        self.paren_depth += 1;
        let body = self.parse_statements(Some(b')'));
        self.paren_depth -= 1;
        let complete = self.eat(b')');
        self.leave();

        let node = self.node(NodeKind::Subshell, start, self.pos, complete, body);
        self.with_trailing_redirects(node)
    }

    /// Parse a compound statement: `{ statements }`. The closing brace is only
    /// recognized where a new statement could start.
    pub(super) fn parse_compound_statement(&mut self) -> Node {
        let start = self.pos;
        if !self.enter() {
            return self.truncated(NodeKind::CompoundStatement, start);
        }
        self.bump(1);
        let body = self.parse_statements(Some(b'}'));
        let complete = self.eat(b'}');
        self.leave();

        let node = self.node(NodeKind::CompoundStatement, start, self.pos, complete, body);
        self.with_trailing_redirects(node)
    }

    /// `( ... ) > out`: redirects after a compound unit become its children.
    fn with_trailing_redirects(&mut self, mut node: Node) -> Node {
        let mut extended = false;
        loop {
            let save = self.pos;
            self.skip_blanks();
            if self.at("<(") || self.at(">(") {
                self.pos = save;
                break;
            }
            match self.try_parse_redirect() {
                Some(redirect) => {
                    node.children.push(redirect);
                    extended = true;
                }
                None => {
                    self.pos = save;
                    break;
                }
            }
        }

        if !extended {
            return node;
        }
        let end = node
            .children
            .last()
            .map_or(node.end_index, |c| c.end_index.max(node.end_index));
        self.node(node.kind, node.start_index, end, node.complete, node.children)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::types::{ListOperator, NodeKind, RedirectOperator};
    use crate::parser::parse;

    #[test]
    fn test_parse_subshell() {
        let program = parse("(cd /tmp && ls) | wc -l");
        let pipeline = &program.children[0];
        assert_eq!(pipeline.kind, NodeKind::Pipeline(ListOperator::Pipe));
        let subshell = &pipeline.children[0];
        assert_eq!(subshell.kind, NodeKind::Subshell);
        assert!(subshell.complete);
        assert_eq!(subshell.text, "(cd /tmp && ls)");
        assert_eq!(subshell.children[0].kind, NodeKind::List(ListOperator::And));
    }

    #[test]
    fn test_unterminated_subshell() {
        let program = parse("(echo hi; ls -");
        let subshell = &program.children[0];
        assert_eq!(subshell.kind, NodeKind::Subshell);
        assert!(!subshell.complete);
        assert_eq!(subshell.children.len(), 2);
        assert_eq!(subshell.end_index, 14);
    }

    #[test]
    fn test_parse_compound_statement() {
        let program = parse("{ echo a; echo b; } > out");
        let compound = &program.children[0];
        assert_eq!(compound.kind, NodeKind::CompoundStatement);
        assert!(compound.complete);
        assert_eq!(compound.text, "{ echo a; echo b; } > out");
        let kinds: Vec<_> = compound.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Command,
                NodeKind::Command,
                NodeKind::Redirect(RedirectOperator::Great)
            ]
        );
    }

    #[test]
    fn test_brace_inside_command_is_a_word() {
        let program = parse("{ echo }");
        let compound = &program.children[0];
        assert!(!compound.complete);
        assert_eq!(compound.children[0].children[1].text, "}");
    }

    #[test]
    fn test_brace_word_is_not_compound() {
        let program = parse("find . -exec rm {} ;");
        let command = &program.children[0];
        assert_eq!(command.kind, NodeKind::Command);
        assert_eq!(command.children[4].text, "{}");
    }
}
