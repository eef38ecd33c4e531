//! Expansion Parser
//!
//! Handles `$`-introduced constructs and backtick substitutions: simple and
//! special parameters, `${...}`, `$((...))`, `$(...)`, `<(...)`/`>(...)` and
//! `` `...` ``. Substitution bodies are parsed as nested statements.

use crate::ast::types::{Node, NodeKind};
use crate::parser::parser::Parser;
use crate::parser::types::{is_name_char, is_name_start, is_special_parameter};

impl Parser {
    /// Whether the `$` under the cursor begins an expansion in an unquoted
    /// word. A `$` followed by anything else is a literal character.
    pub(super) fn dollar_starts_expansion(&self) -> bool {
        match self.peek_at(1) {
            Some(b'\'' | b'"') => true,
            _ => self.dollar_starts_expansion_in_string(),
        }
    }

    /// Same as [`dollar_starts_expansion`](Self::dollar_starts_expansion) but
    /// for double-quoted context, where `$'` and `$"` are literal.
    pub(super) fn dollar_starts_expansion_in_string(&self) -> bool {
        match self.peek_at(1) {
            Some(b'(' | b'{') => true,
            Some(b) => is_name_start(b) || is_special_parameter(b),
            None => false,
        }
    }

    pub(super) fn parse_dollar(&mut self) -> Node {
        let start = self.pos;
        match self.peek_at(1) {
            Some(b'(') if self.peek_at(2) == Some(b'(') => self.parse_arithmetic_expansion(),
            Some(b'(') => self.parse_parenthesized(NodeKind::CommandSubstitution),
            Some(b'{') => self.parse_parameter_expansion(),
            Some(b'\'') => self.parse_ansi_c_string(),
            Some(b'"') => {
                // Locale string: `$"..."` is a string starting at the `$`
                self.bump(1);
                self.parse_string(start)
            }
            Some(b) if is_name_start(b) => {
                self.bump(1);
                while self.peek().is_some_and(is_name_char) {
                    self.bump(1);
                }
                self.node(NodeKind::SimpleExpansion, start, self.pos, true, Vec::new())
            }
            Some(b) if is_special_parameter(b) => {
                self.bump(2);
                self.node(NodeKind::SpecialExpansion, start, self.pos, true, Vec::new())
            }
            _ => self.parse_unquoted(),
        }
    }

    /// `$(...)`, `<(...)` or `>(...)`: a two-byte opener followed by nested
    /// statements up to the matching `)`.
    pub(super) fn parse_parenthesized(&mut self, kind: NodeKind) -> Node {
        let start = self.pos;
        if !self.enter() {
            return self.truncated(kind, start);
        }
        self.bump(2);
        self.paren_depth += 1;
        let in_backtick = std::mem::replace(&mut self.in_backtick, false);
        let body = self.parse_statements(Some(b')'));
        self.in_backtick = in_backtick;
        self.paren_depth -= 1;
        let complete = self.eat(b')');
        self.leave();

        self.node(kind, start, self.pos, complete, body)
    }

    /// `` `...` ``. Parentheses opened outside do not close inside.
    pub(super) fn parse_backtick_substitution(&mut self) -> Node {
        let start = self.pos;
        if !self.enter() {
            return self.truncated(NodeKind::CommandSubstitution, start);
        }
        self.bump(1);
        let paren_depth = std::mem::replace(&mut self.paren_depth, 0);
        let in_backtick = std::mem::replace(&mut self.in_backtick, true);
        let body = self.parse_statements(Some(b'`'));
        self.in_backtick = in_backtick;
        self.paren_depth = paren_depth;
        let complete = self.eat(b'`');
        self.leave();

        self.node(NodeKind::CommandSubstitution, start, self.pos, complete, body)
    }

    /// `$(( expr ))`. The expression is kept as text; nested expansions
    /// become children.
    fn parse_arithmetic_expansion(&mut self) -> Node {
        let start = self.pos;
        if !self.enter() {
            return self.truncated(NodeKind::ArithmeticExpansion, start);
        }
        self.bump(3);
        let mut children = Vec::new();
        let mut depth = 0usize;
        let mut complete = false;
        while let Some(b) = self.peek() {
            match b {
                b')' if depth == 0 && self.peek_at(1) == Some(b')') => {
                    self.bump(2);
                    complete = true;
                    break;
                }
                b'(' => {
                    depth += 1;
                    self.bump(1);
                }
                b')' => {
                    depth = depth.saturating_sub(1);
                    self.bump(1);
                }
                b'$' if self.dollar_starts_expansion_in_string() => {
                    children.push(self.parse_dollar());
                }
                b'`' if !self.in_backtick => children.push(self.parse_backtick_substitution()),
                b'\\' => {
                    self.bump(1);
                    if !self.at_end() {
                        self.bump_char();
                    }
                }
                _ => {
                    self.bump_char();
                }
            }
        }
        self.leave();

        self.node(NodeKind::ArithmeticExpansion, start, self.pos, complete, children)
    }

    /// `${...}` up to the matching `}`; quotes and nested expansions inside
    /// the braces are parsed so a `}` within them does not close it.
    fn parse_parameter_expansion(&mut self) -> Node {
        let start = self.pos;
        if !self.enter() {
            return self.truncated(NodeKind::ParameterExpansion, start);
        }
        self.bump(2);
        let mut children = Vec::new();
        let mut complete = false;
        while let Some(b) = self.peek() {
            match b {
                b'}' => {
                    self.bump(1);
                    complete = true;
                    break;
                }
                b'"' => children.push(self.parse_string(self.pos)),
                b'\'' => children.push(self.parse_raw_string()),
                b'$' if self.dollar_starts_expansion_in_string() => {
                    children.push(self.parse_dollar());
                }
                b'`' if !self.in_backtick => children.push(self.parse_backtick_substitution()),
                b'\\' => {
                    self.bump(1);
                    if !self.at_end() {
                        self.bump_char();
                    }
                }
                _ => {
                    self.bump_char();
                }
            }
        }
        self.leave();

        self.node(NodeKind::ParameterExpansion, start, self.pos, complete, children)
    }
}
