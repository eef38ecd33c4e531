//! Abstract Syntax Tree (AST) Types for Shell Command Lines
//!
//! Every construct is a [`Node`]: a closed [`NodeKind`] tag, the raw source
//! slice it covers, its quote-resolved text, a half-open byte span into the
//! buffer that produced it and its ordered children.
//!
//! The tree is built for editing buffers, so a node whose terminator was not
//! found before the buffer ended is still produced, with `complete = false`.

use serde::Serialize;
use std::fmt;

// =============================================================================
// OPERATORS
// =============================================================================

/// Operator joining the two operands of a `List` or `Pipeline` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListOperator {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
    #[serde(rename = "|")]
    Pipe,
    #[serde(rename = "|&")]
    PipeAll,
}

impl ListOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
            Self::Pipe => "|",
            Self::PipeAll => "|&",
        }
    }

    /// Pipeline operators bind tighter than list operators.
    pub fn is_pipe(&self) -> bool {
        matches!(self, Self::Pipe | Self::PipeAll)
    }
}

impl fmt::Display for ListOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssignmentOperator {
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "+=")]
    Append,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Append => "+=",
        }
    }
}

impl fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RedirectOperator {
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Great,
    #[serde(rename = "<<")]
    DLess,
    #[serde(rename = ">>")]
    DGreat,
    #[serde(rename = "<&")]
    LessAnd,
    #[serde(rename = ">&")]
    GreatAnd,
    #[serde(rename = "<>")]
    LessGreat,
    #[serde(rename = "<<-")]
    DLessDash,
    #[serde(rename = ">|")]
    Clobber,
    #[serde(rename = "<<<")]
    TLess,
    #[serde(rename = "&>")]
    AndGreat,
    #[serde(rename = "&>>")]
    AndDGreat,
}

impl RedirectOperator {
    /// All operators, longest spelling first so prefix matching is greedy.
    pub const ALL: [RedirectOperator; 12] = [
        Self::AndDGreat,
        Self::DLessDash,
        Self::TLess,
        Self::AndGreat,
        Self::DLess,
        Self::DGreat,
        Self::LessAnd,
        Self::GreatAnd,
        Self::LessGreat,
        Self::Clobber,
        Self::Less,
        Self::Great,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::Great => ">",
            Self::DLess => "<<",
            Self::DGreat => ">>",
            Self::LessAnd => "<&",
            Self::GreatAnd => ">&",
            Self::LessGreat => "<>",
            Self::DLessDash => "<<-",
            Self::Clobber => ">|",
            Self::TLess => "<<<",
            Self::AndGreat => "&>",
            Self::AndDGreat => "&>>",
        }
    }
}

impl fmt::Display for RedirectOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NODE KINDS
// =============================================================================

/// Closed set of constructs the parser produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// Root: whole buffer, children are top-level statements
    Program,
    /// `a && b`, `a || b`
    List(ListOperator),
    /// `a | b`, `a |& b`
    Pipeline(ListOperator),
    /// `( ... )`
    Subshell,
    /// `{ ...; }`
    CompoundStatement,
    /// Command name, arguments and redirects
    Command,
    /// Leading assignments, optionally followed by one `Command`
    AssignmentList { has_command: bool },
    Assignment(AssignmentOperator),
    VariableName,
    /// `name[index]`
    Subscript,
    Redirect(RedirectOperator),

    // Literal word fragments
    Word,
    /// `"..."`
    String,
    /// `'...'`
    RawString,
    /// `$'...'`
    AnsiCString,
    /// `$(...)` or backticks
    CommandSubstitution,
    /// `<(...)`, `>(...)`
    ProcessSubstitution,
    /// `$name`
    SimpleExpansion,
    /// `$@`, `$?`, `$1`, ...
    SpecialExpansion,
    /// `${...}`
    ParameterExpansion,
    /// `$((...))`
    ArithmeticExpansion,
    /// Adjacent fragments with no separating whitespace
    Concatenation,
}

impl NodeKind {
    /// Snake-case name used by the tree printer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::List(_) => "list",
            Self::Pipeline(_) => "pipeline",
            Self::Subshell => "subshell",
            Self::CompoundStatement => "compound_statement",
            Self::Command => "command",
            Self::AssignmentList { .. } => "assignment_list",
            Self::Assignment(_) => "assignment",
            Self::VariableName => "variable_name",
            Self::Subscript => "subscript",
            Self::Redirect(_) => "redirect",
            Self::Word => "word",
            Self::String => "string",
            Self::RawString => "raw_string",
            Self::AnsiCString => "ansi_c_string",
            Self::CommandSubstitution => "command_substitution",
            Self::ProcessSubstitution => "process_substitution",
            Self::SimpleExpansion => "simple_expansion",
            Self::SpecialExpansion => "special_expansion",
            Self::ParameterExpansion => "parameter_expansion",
            Self::ArithmeticExpansion => "arithmetic_expansion",
            Self::Concatenation => "concatenation",
        }
    }

    /// Kinds that can stand as a word fragment.
    pub fn is_literal(&self) -> bool {
        match self {
            Self::String
            | Self::AnsiCString
            | Self::RawString
            | Self::CommandSubstitution
            | Self::Concatenation
            | Self::SimpleExpansion
            | Self::SpecialExpansion
            | Self::ParameterExpansion
            | Self::ArithmeticExpansion
            | Self::Word => true,
            Self::Program
            | Self::List(_)
            | Self::Pipeline(_)
            | Self::Subshell
            | Self::CompoundStatement
            | Self::Command
            | Self::AssignmentList { .. }
            | Self::Assignment(_)
            | Self::VariableName
            | Self::Subscript
            | Self::Redirect(_)
            | Self::ProcessSubstitution => false,
        }
    }

    /// Kinds that occupy an argument slot of a command.
    pub fn is_argument(&self) -> bool {
        self.is_literal() || matches!(self, Self::ProcessSubstitution)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(op) | Self::Pipeline(op) => write!(f, "{}({})", self.name(), op),
            Self::Assignment(op) => write!(f, "{}({})", self.name(), op),
            Self::Redirect(op) => write!(f, "{}({})", self.name(), op),
            Self::AssignmentList { has_command } => {
                write!(f, "{}(has_command={})", self.name(), has_command)
            }
            _ => f.write_str(self.name()),
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Raw source slice, untouched
    pub text: String,
    /// Text with quoting and escaping resolved for this kind
    pub inner_text: String,
    pub start_index: usize,
    pub end_index: usize,
    /// Whether the construct's terminator was found before the buffer ended
    pub complete: bool,
    pub children: Vec<Node>,
}

impl Node {
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Whether `index` falls inside the span, end inclusive (a cursor placed
    /// right after the last character still belongs to the node).
    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    /// Operator of a `List` or `Pipeline` node.
    pub fn operator(&self) -> Option<ListOperator> {
        match self.kind {
            NodeKind::List(op) | NodeKind::Pipeline(op) => Some(op),
            _ => None,
        }
    }

    pub fn assignment_operator(&self) -> Option<AssignmentOperator> {
        match self.kind {
            NodeKind::Assignment(op) => Some(op),
            _ => None,
        }
    }

    pub fn has_command(&self) -> bool {
        matches!(self.kind, NodeKind::AssignmentList { has_command: true })
    }

    /// Name child of an `Assignment` (variable name or subscript) or of a
    /// `Subscript` (variable name).
    pub fn name(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::Assignment(_) | NodeKind::Subscript => self.children.first(),
            _ => None,
        }
    }

    /// Value child of an `Assignment`, or index child of a `Subscript`.
    pub fn value(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::Assignment(_) | NodeKind::Subscript => self.children.get(1),
            _ => None,
        }
    }

    /// Complete, childless `Word` node for `text` starting at `start`.
    pub fn word(text: &str, start: usize) -> Node {
        Node {
            kind: NodeKind::Word,
            text: text.to_string(),
            inner_text: text.to_string(),
            start_index: start,
            end_index: start + text.len(),
            complete: true,
            children: Vec::new(),
        }
    }

    /// Copy of the subtree with every span moved right by `offset` bytes.
    pub fn shift_by(&self, offset: usize) -> Node {
        Node {
            kind: self.kind,
            text: self.text.clone(),
            inner_text: self.inner_text.clone(),
            start_index: self.start_index + offset,
            end_index: self.end_index + offset,
            complete: self.complete,
            children: self.children.iter().map(|c| c.shift_by(offset)).collect(),
        }
    }

    /// Deepest node whose span contains `index`.
    pub fn descendant_at(&self, index: usize) -> Option<&Node> {
        if !self.contains(index) {
            return None;
        }
        self.children
            .iter()
            .find_map(|child| child.descendant_at(index))
            .or(Some(self))
    }
}

// =============================================================================
// FACTORY FUNCTIONS (AST builders)
// =============================================================================

/// AST factory for building nodes
pub struct AST;

impl AST {
    /// Build a node over `input[start..end]`; `inner_text` defaults to the
    /// raw slice.
    pub fn node(
        kind: NodeKind,
        input: &str,
        start: usize,
        end: usize,
        complete: bool,
        children: Vec<Node>,
    ) -> Node {
        let text = input.get(start..end).unwrap_or_default().to_string();
        Node {
            kind,
            inner_text: text.clone(),
            text,
            start_index: start,
            end_index: end,
            complete,
            children,
        }
    }

    pub fn with_inner_text(mut node: Node, inner_text: impl Into<String>) -> Node {
        node.inner_text = inner_text.into();
        node
    }

    /// Binary `List`/`Pipeline` node over `left` and an optional right operand.
    /// A missing right operand leaves the node incomplete.
    pub fn list(
        operator: ListOperator,
        input: &str,
        left: Node,
        right: Option<Node>,
        operator_end: usize,
    ) -> Node {
        let kind = if operator.is_pipe() {
            NodeKind::Pipeline(operator)
        } else {
            NodeKind::List(operator)
        };
        let start = left.start_index;
        match right {
            Some(right) => {
                let end = right.end_index;
                AST::node(kind, input, start, end, true, vec![left, right])
            }
            None => AST::node(kind, input, start, operator_end, false, vec![left]),
        }
    }
}

/// Synthesize a standalone `Word` node for `text` at `start_index`, without
/// reparsing. `buffer` is the text the offsets refer to; both ends of the
/// span are clamped into it so the node never points past its end.
///
/// The node keeps `text` even where it differs from the buffer slice under
/// its span: it describes text that is about to be spliced in.
pub fn create_text_node(text: &str, start_index: usize, buffer: &str) -> Node {
    let start = floor_char_boundary(buffer, start_index);
    let mut node = Node::word(text, start);
    node.end_index = floor_char_boundary(buffer, node.end_index);
    node
}

fn floor_char_boundary(buffer: &str, index: usize) -> usize {
    let mut index = index.min(buffer.len());
    while !buffer.is_char_boundary(index) {
        index -= 1;
    }
    index
}
