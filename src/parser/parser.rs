//! Recursive Descent Parser for Shell Command Lines
//!
//! Works directly on the buffer text so every node keeps exact byte offsets.
//! The parser never fails: constructs whose terminator is missing are closed
//! at the end of the buffer with `complete = false`, which is the normal
//! state of a line that is still being typed.
//!
//! Grammar (simplified, loosest first):
//!   program      ::= statement ((';' | '&' | NEWLINE) statement)*
//!   statement    ::= pipeline (('&&' | '||') pipeline)*
//!   pipeline     ::= unit (('|' | '|&') unit)*
//!   unit         ::= subshell | compound | assignments [command]
//!   command      ::= (word | redirect)+
//!   word         ::= fragment+            (adjacent fragments concatenate)

use crate::ast::types::{AssignmentOperator, ListOperator, Node, NodeKind, RedirectOperator, AST};
use crate::parser::types::{
    is_blank, is_metachar, is_name_char, is_name_start, ParseError, MAX_PARSER_DEPTH,
};
use log::{trace, warn};

/// Parse a buffer into a `Program` tree. Never fails.
pub fn parse(buffer: &str) -> Node {
    Parser::new().parse(buffer)
}

/// Parse a buffer, surfacing a depth overrun as an error instead of a
/// silently truncated tree.
pub fn try_parse(buffer: &str) -> Result<Node, ParseError> {
    let mut parser = Parser::new();
    let tree = parser.parse(buffer);
    match parser.error {
        Some(err) => Err(err),
        None => Ok(tree),
    }
}

/// Main parser struct
pub struct Parser {
    pub(super) input: String,
    pub(super) pos: usize,
    pub(super) depth: usize,
    pub(super) max_depth: usize,
    /// Open `(`-style constructs; a `)` closes one of them instead of being a word.
    pub(super) paren_depth: usize,
    /// Inside backticks a '`' closes the substitution.
    pub(super) in_backtick: bool,
    pub(super) error: Option<ParseError>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Self::with_max_depth(MAX_PARSER_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Parser {
            input: String::new(),
            pos: 0,
            depth: 0,
            max_depth,
            paren_depth: 0,
            in_backtick: false,
            error: None,
        }
    }

    /// Error recorded during the last `parse` call, if any.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Parse a buffer into a `Program` node spanning all of it.
    pub fn parse(&mut self, input: &str) -> Node {
        self.input = input.to_string();
        self.pos = 0;
        self.depth = 0;
        self.paren_depth = 0;
        self.in_backtick = false;
        self.error = None;

        let statements = self.parse_statements(None);
        trace!(
            "parse event=done len={} statements={} truncated={}",
            self.input.len(),
            statements.len(),
            self.error.is_some()
        );
        self.node(NodeKind::Program, 0, self.input.len(), true, statements)
    }

    // ===========================================================================
    // HELPER METHODS
    // ===========================================================================

    pub(super) fn node(
        &self,
        kind: NodeKind,
        start: usize,
        end: usize,
        complete: bool,
        children: Vec<Node>,
    ) -> Node {
        AST::node(kind, &self.input, start, end, complete, children)
    }

    pub(super) fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    pub(super) fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    pub(super) fn at(&self, s: &str) -> bool {
        self.input.as_bytes()[self.pos..].starts_with(s.as_bytes())
    }

    pub(super) fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Advance over `n` ASCII bytes.
    pub(super) fn bump(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Advance over one full character and return it.
    pub(super) fn bump_char(&mut self) -> char {
        match self.input[self.pos..].chars().next() {
            Some(c) => {
                self.pos += c.len_utf8();
                c
            }
            None => '\0',
        }
    }

    pub(super) fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Whether `b` closes a construct that encloses the current position.
    pub(super) fn closes_enclosing(&self, b: u8) -> bool {
        (b == b')' && self.paren_depth > 0) || (b == b'`' && self.in_backtick)
    }

    /// Enter one nesting level. Returns false (and records the overrun) when
    /// the depth limit is reached.
    pub(super) fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            if self.error.is_none() {
                warn!(
                    "parse event=depth_exceeded limit={} offset={}",
                    self.max_depth, self.pos
                );
                self.error = Some(ParseError::DepthExceeded {
                    limit: self.max_depth,
                    offset: self.pos,
                });
            }
            return false;
        }
        self.depth += 1;
        true
    }

    pub(super) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Close out a construct that could not be descended into: it swallows
    /// the rest of the buffer and stays incomplete.
    pub(super) fn truncated(&mut self, kind: NodeKind, start: usize) -> Node {
        self.pos = self.input.len();
        self.node(kind, start, self.pos, false, Vec::new())
    }

    /// Spaces, tabs and line continuations.
    pub(super) fn skip_blanks(&mut self) {
        loop {
            match self.peek() {
                Some(b) if is_blank(b) => self.bump(1),
                Some(b'\\') if self.peek_at(1) == Some(b'\n') => self.bump(2),
                _ => break,
            }
        }
    }

    fn skip_comment(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.bump_char();
        }
    }

    /// Blanks, newlines and comments; used after `&&`, `||` and `|` where a
    /// line break may separate the operands.
    fn skip_linebreaks(&mut self) {
        loop {
            self.skip_blanks();
            match self.peek() {
                Some(b'\n') => self.bump(1),
                Some(b'#') => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\n' | b';' => self.bump(1),
                b'&' if !self.at("&&") && !self.at("&>") => self.bump(1),
                b'\\' if self.peek_at(1) == Some(b'\n') => self.bump(2),
                b'#' => self.skip_comment(),
                _ => break,
            }
        }
    }

    // ===========================================================================
    // STATEMENTS, LISTS AND PIPELINES
    // ===========================================================================

    /// Parse statements until the end of the buffer, the `until` byte at a
    /// statement start, or a byte closing an enclosing construct.
    pub(super) fn parse_statements(&mut self, until: Option<u8>) -> Vec<Node> {
        let mut statements = Vec::new();
        loop {
            self.skip_separators();
            let Some(b) = self.peek() else { break };
            if Some(b) == until || self.closes_enclosing(b) {
                break;
            }

            let start = self.pos;
            let statement = if b == b')' {
                self.stray_command()
            } else {
                self.parse_list()
            };
            if self.pos == start {
                // Nothing consumed; take one character so parsing always advances
                statements.push(self.stray_command());
                continue;
            }
            statements.push(statement);
        }
        statements
    }

    /// Chains nest to the left, so every `&&`/`||` step counts as one depth
    /// level for as long as the chain lasts.
    fn parse_list(&mut self) -> Node {
        let mut left = self.parse_pipeline();
        let mut levels = 0;
        loop {
            self.skip_blanks();
            let operator = if self.at("&&") {
                ListOperator::And
            } else if self.at("||") {
                ListOperator::Or
            } else {
                break;
            };
            self.bump(2);
            let operator_end = self.pos;
            self.skip_linebreaks();

            let (right, stop) = self.chain_operand(&mut levels, Self::parse_pipeline);
            left = AST::list(operator, &self.input, left, right, operator_end);
            if stop {
                break;
            }
        }
        (0..levels).for_each(|_| self.leave());
        left
    }

    fn parse_pipeline(&mut self) -> Node {
        let mut left = self.parse_unit();
        let mut levels = 0;
        loop {
            self.skip_blanks();
            let operator = if self.at("||") {
                break;
            } else if self.at("|&") {
                ListOperator::PipeAll
            } else if self.at("|") {
                ListOperator::Pipe
            } else {
                break;
            };
            self.bump(operator.as_str().len());
            let operator_end = self.pos;
            self.skip_linebreaks();

            let (right, stop) = self.chain_operand(&mut levels, Self::parse_unit);
            left = AST::list(operator, &self.input, left, right, operator_end);
            if stop {
                break;
            }
        }
        (0..levels).for_each(|_| self.leave());
        left
    }

    /// Right operand of a chain step. Returns the operand and whether the
    /// chain ends here: at a dangling operator, or at the depth limit, where
    /// the rest of the buffer becomes one incomplete command.
    fn chain_operand(
        &mut self,
        levels: &mut usize,
        parse_operand: fn(&mut Self) -> Node,
    ) -> (Option<Node>, bool) {
        if !self.can_start_command() {
            return (None, true);
        }
        if !self.enter() {
            let start = self.pos;
            return (Some(self.truncated(NodeKind::Command, start)), true);
        }
        *levels += 1;
        (Some(parse_operand(self)), false)
    }

    fn can_start_command(&self) -> bool {
        match self.peek() {
            None => false,
            Some(b';' | b'|' | b'\n') => false,
            Some(b'&') => self.at("&>"),
            Some(b) => !self.closes_enclosing(b),
        }
    }

    fn parse_unit(&mut self) -> Node {
        match self.peek() {
            Some(b'(') => self.parse_subshell(),
            Some(b'{') if self.peek_at(1).map_or(true, is_metachar) => {
                self.parse_compound_statement()
            }
            _ => self.parse_command(),
        }
    }

    /// A lone `)` (or an unparsable character) standing as its own command.
    fn stray_command(&mut self) -> Node {
        let word = self.single_char_word();
        let (start, end) = (word.start_index, word.end_index);
        self.node(NodeKind::Command, start, end, true, vec![word])
    }

    pub(super) fn single_char_word(&mut self) -> Node {
        let start = self.pos;
        self.bump_char();
        self.node(NodeKind::Word, start, self.pos, true, Vec::new())
    }

    // ===========================================================================
    // COMMANDS
    // ===========================================================================

    fn parse_command(&mut self) -> Node {
        let mut assignments = Vec::new();
        while let Some(assignment) = self.try_parse_assignment() {
            assignments.push(assignment);
            self.skip_blanks();
        }

        let mut arguments = Vec::new();
        loop {
            self.skip_blanks();
            if self.at_command_end() {
                break;
            }
            if self.at("<(") || self.at(">(") {
                arguments.push(self.parse_parenthesized(NodeKind::ProcessSubstitution));
                continue;
            }
            if let Some(redirect) = self.try_parse_redirect() {
                arguments.push(redirect);
                continue;
            }
            let argument = match self.peek() {
                Some(b'(' | b')') => self.single_char_word(),
                _ => match self.parse_word() {
                    Some(word) => word,
                    None => self.single_char_word(),
                },
            };
            arguments.push(argument);
        }

        self.build_command(assignments, arguments)
    }

    fn at_command_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(b'\n' | b';' | b'|' | b'#') => true,
            Some(b'&') => !self.at("&>"),
            Some(b) => self.closes_enclosing(b),
        }
    }

    fn build_command(&mut self, assignments: Vec<Node>, arguments: Vec<Node>) -> Node {
        let command = match (arguments.first(), arguments.last()) {
            (Some(first), Some(last)) => {
                let (start, end) = (first.start_index, last.end_index);
                Some(self.node(NodeKind::Command, start, end, true, arguments))
            }
            _ => None,
        };

        if assignments.is_empty() {
            return command
                .unwrap_or_else(|| self.node(NodeKind::Command, self.pos, self.pos, true, Vec::new()));
        }

        let start = assignments[0].start_index;
        let has_command = command.is_some();
        let mut children = assignments;
        children.extend(command);
        let end = children.last().map_or(start, |n| n.end_index);
        self.node(NodeKind::AssignmentList { has_command }, start, end, true, children)
    }

    /// `name=value`, `name+=value`, `name[index]=value`.
    fn try_parse_assignment(&mut self) -> Option<Node> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        if !bytes.get(start).copied().is_some_and(is_name_start) {
            return None;
        }
        let mut i = start + 1;
        while bytes.get(i).copied().is_some_and(is_name_char) {
            i += 1;
        }
        let name_end = i;

        let mut subscript_end = None;
        if bytes.get(i) == Some(&b'[') {
            let mut j = i + 1;
            while let Some(&b) = bytes.get(j) {
                if b == b']' || is_metachar(b) {
                    break;
                }
                j += 1;
            }
            if bytes.get(j) != Some(&b']') {
                return None;
            }
            subscript_end = Some(j + 1);
            i = j + 1;
        }

        let operator = if bytes.get(i) == Some(&b'=') {
            AssignmentOperator::Assign
        } else if bytes.get(i..i + 2) == Some(&b"+="[..]) {
            AssignmentOperator::Append
        } else {
            return None;
        };

        let variable = self.node(NodeKind::VariableName, start, name_end, true, Vec::new());
        let name = match subscript_end {
            Some(end) => {
                let index = self.node(NodeKind::Word, name_end + 1, end - 1, true, Vec::new());
                self.node(NodeKind::Subscript, start, end, true, vec![variable, index])
            }
            None => variable,
        };
        self.pos = i + operator.as_str().len();

        let mut children = vec![name];
        let value = if self.peek() == Some(b'(') {
            Some(self.parse_array_value())
        } else {
            self.parse_word()
        };
        children.extend(value);
        Some(self.node(NodeKind::Assignment(operator), start, self.pos, true, children))
    }

    /// `name=(a b c)` kept as one raw word.
    fn parse_array_value(&mut self) -> Node {
        let start = self.pos;
        let mut depth = 0usize;
        let mut complete = false;
        while let Some(b) = self.peek() {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump(1);
                        complete = true;
                        break;
                    }
                }
                b'\\' => {
                    self.bump(1);
                    if self.at_end() {
                        break;
                    }
                }
                _ => {}
            }
            self.bump_char();
        }
        self.node(NodeKind::Word, start, self.pos, complete, Vec::new())
    }

    /// `[n]op target` where op is one of the redirect operators. Leaves the
    /// cursor untouched when no redirect starts here.
    pub(super) fn try_parse_redirect(&mut self) -> Option<Node> {
        let start = self.pos;
        let bytes = self.input.as_bytes();
        let mut i = start;
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        let rest = &self.input[i..];
        let operator = RedirectOperator::ALL
            .into_iter()
            .find(|op| rest.starts_with(op.as_str()))?;
        if i > start && matches!(operator, RedirectOperator::AndGreat | RedirectOperator::AndDGreat) {
            return None;
        }

        let operator_end = i + operator.as_str().len();
        self.pos = operator_end;
        self.skip_blanks();
        let target = if self.at_command_end() || self.at("<(") || self.at(">(") {
            None
        } else {
            self.parse_word()
        };
        if target.is_none() {
            self.pos = operator_end;
        }

        let complete = target.is_some();
        let end = target.as_ref().map_or(operator_end, |t| t.end_index);
        Some(self.node(
            NodeKind::Redirect(operator),
            start,
            end,
            complete,
            target.into_iter().collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_statement(input: &str) -> Node {
        let program = parse(input);
        assert_eq!(program.kind, NodeKind::Program);
        program.children.into_iter().next().expect("a statement")
    }

    fn texts(node: &Node) -> Vec<&str> {
        node.children.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_parse_empty() {
        let program = parse("");
        assert_eq!(program.span(), 0..0);
        assert!(program.children.is_empty());

        assert!(parse("   \n\t ").children.is_empty());
    }

    #[test]
    fn test_parse_simple_command() {
        let command = first_statement("git commit -m \"msg\"");
        assert_eq!(command.kind, NodeKind::Command);
        assert_eq!(texts(&command), vec!["git", "commit", "-m", "\"msg\""]);
        assert_eq!(command.children[3].kind, NodeKind::String);
        assert_eq!(command.children[3].inner_text, "msg");
    }

    #[test]
    fn test_parse_statements_are_siblings() {
        let program = parse("cd /tmp; ls & echo done\npwd");
        let kinds: Vec<_> = program.children.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(kinds, vec!["cd /tmp", "ls", "echo done", "pwd"]);
    }

    #[test]
    fn test_parse_pipeline() {
        let pipeline = first_statement("cat file | grep foo |& wc -l");
        assert_eq!(pipeline.kind, NodeKind::Pipeline(ListOperator::PipeAll));
        assert_eq!(pipeline.children.len(), 2);
        // Left-associative: the first pipe nests as the left operand
        let inner = &pipeline.children[0];
        assert_eq!(inner.kind, NodeKind::Pipeline(ListOperator::Pipe));
        assert_eq!(texts(inner), vec!["cat file", "grep foo"]);
        assert_eq!(pipeline.children[1].text, "wc -l");
    }

    #[test]
    fn test_pipes_bind_tighter_than_lists() {
        let list = first_statement("a | b && c || d");
        assert_eq!(list.kind, NodeKind::List(ListOperator::Or));
        let left = &list.children[0];
        assert_eq!(left.kind, NodeKind::List(ListOperator::And));
        assert_eq!(left.children[0].kind, NodeKind::Pipeline(ListOperator::Pipe));
        assert_eq!(list.children[1].text, "d");
    }

    #[test]
    fn test_trailing_operator_is_incomplete() {
        let list = first_statement("make &&");
        assert_eq!(list.kind, NodeKind::List(ListOperator::And));
        assert_eq!(list.children.len(), 1);
        assert!(!list.complete);
        assert_eq!(list.text, "make &&");

        let pipeline = first_statement("ls |   ");
        assert_eq!(pipeline.kind, NodeKind::Pipeline(ListOperator::Pipe));
        assert_eq!(pipeline.text, "ls |");
        assert!(!pipeline.complete);
    }

    #[test]
    fn test_operator_continues_on_next_line() {
        let list = first_statement("true &&\n  echo ok");
        assert!(list.complete);
        assert_eq!(list.children[1].text, "echo ok");
    }

    #[test]
    fn test_assignment_list_with_command() {
        let list = first_statement("FOO=bar BAZ+=1 make -j");
        assert_eq!(list.kind, NodeKind::AssignmentList { has_command: true });
        assert!(list.has_command());
        assert_eq!(list.children.len(), 3);

        let first = &list.children[0];
        assert_eq!(first.assignment_operator(), Some(AssignmentOperator::Assign));
        assert_eq!(first.name().map(|n| n.text.as_str()), Some("FOO"));
        assert_eq!(first.value().map(|n| n.text.as_str()), Some("bar"));
        assert_eq!(
            list.children[1].assignment_operator(),
            Some(AssignmentOperator::Append)
        );

        let command = &list.children[2];
        assert_eq!(command.kind, NodeKind::Command);
        assert_eq!(texts(command), vec!["make", "-j"]);
    }

    #[test]
    fn test_assignment_only() {
        let list = first_statement("A=1 B=");
        assert_eq!(list.kind, NodeKind::AssignmentList { has_command: false });
        assert_eq!(list.children.len(), 2);
        assert!(list.children[1].value().is_none());
    }

    #[test]
    fn test_subscript_assignment() {
        let list = first_statement("arr[2]=x");
        let assignment = &list.children[0];
        let name = assignment.name().expect("name");
        assert_eq!(name.kind, NodeKind::Subscript);
        assert_eq!(name.name().map(|n| n.text.as_str()), Some("arr"));
        assert_eq!(name.value().map(|n| n.text.as_str()), Some("2"));
    }

    #[test]
    fn test_array_assignment_value() {
        let list = first_statement("arr=(a b c) cmd");
        assert_eq!(list.children[0].value().map(|n| n.text.as_str()), Some("(a b c)"));
        assert!(list.has_command());
    }

    #[test]
    fn test_assignment_after_command_name_is_a_word() {
        let command = first_statement("env X=1");
        assert_eq!(command.kind, NodeKind::Command);
        assert_eq!(command.children[1].kind, NodeKind::Word);
    }

    #[test]
    fn test_redirects() {
        let command = first_statement("sort < in.txt 2>&1 >> out.log");
        let kinds: Vec<_> = command.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Word,
                NodeKind::Redirect(RedirectOperator::Less),
                NodeKind::Redirect(RedirectOperator::GreatAnd),
                NodeKind::Redirect(RedirectOperator::DGreat),
            ]
        );
        assert_eq!(command.children[2].text, "2>&1");
        assert_eq!(command.children[3].children[0].text, "out.log");
    }

    #[test]
    fn test_redirect_without_target() {
        let command = first_statement("echo hi >");
        let redirect = &command.children[1];
        assert!(!redirect.complete);
        assert!(redirect.children.is_empty());
        assert_eq!(redirect.span(), 8..9);
    }

    #[test]
    fn test_digits_without_operator_are_a_word() {
        let command = first_statement("head -n 10");
        assert_eq!(texts(&command), vec!["head", "-n", "10"]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let program = parse("ls # list files\necho hi");
        assert_eq!(program.children.len(), 2);
        assert_eq!(program.children[0].text, "ls");
    }

    #[test]
    fn test_stray_close_paren() {
        let program = parse(") ls");
        assert_eq!(program.children.len(), 2);
        assert_eq!(program.children[0].text, ")");
        assert_eq!(program.children[1].text, "ls");
    }

    #[test]
    fn test_unicode_words() {
        let command = first_statement("echo héllo wörld");
        assert_eq!(texts(&command), vec!["echo", "héllo", "wörld"]);
        assert_eq!(command.children[2].end_index, "echo héllo wörld".len());
    }

    #[test]
    fn test_try_parse_ok() {
        assert!(try_parse("echo $(ls)").is_ok());
    }

    #[test]
    fn test_depth_limit_truncates() {
        let input = "$(".repeat(20);
        let mut parser = Parser::with_max_depth(5);
        let tree = parser.parse(&input);
        assert_eq!(
            parser.error(),
            Some(&ParseError::DepthExceeded { limit: 5, offset: 10 })
        );
        assert_eq!(tree.end_index, input.len());

        // Walk down to the truncated node
        let mut node = &tree;
        while let Some(child) = node.children.first() {
            assert!(child.end_index <= node.end_index);
            node = child;
        }
        assert_eq!(node.kind, NodeKind::CommandSubstitution);
        assert_eq!(node.span(), 10..input.len());
        assert!(!node.complete);
    }

    #[test]
    fn test_long_chain_is_depth_limited() {
        let input = "a && b && c && d | e";
        let mut parser = Parser::with_max_depth(2);
        let tree = parser.parse(input);
        assert_eq!(
            parser.error(),
            Some(&ParseError::DepthExceeded { limit: 2, offset: 15 })
        );

        let list = &tree.children[0];
        assert_eq!(list.span(), 0..input.len());
        assert_eq!(list.children.len(), 2);
        let rest = &list.children[1];
        assert_eq!(rest.kind, NodeKind::Command);
        assert_eq!(rest.text, "d | e");
        assert_eq!(list.children[0].text, "a && b && c");
        assert!(!rest.complete);
        assert!(rest.children.is_empty());
    }

    #[test]
    fn test_chain_depth_is_released() {
        // Each statement starts again at depth zero
        let input = "a && b && c; d | e | f; (g && h)";
        let mut parser = Parser::with_max_depth(3);
        let tree = parser.parse(input);
        assert!(parser.error().is_none());
        assert_eq!(tree.children.len(), 3);
        assert!(tree.children.iter().all(|c| c.complete));
    }

    #[test]
    fn test_try_parse_reports_depth() {
        let input = "(".repeat(MAX_PARSER_DEPTH + 10);
        let err = try_parse(&input).expect_err("depth overrun");
        assert!(matches!(err, ParseError::DepthExceeded { limit, .. } if limit == MAX_PARSER_DEPTH));
    }
}
