//! Word Parsing
//!
//! Words are runs of adjacent fragments: unquoted text, double-quoted and
//! single-quoted strings, ANSI-C strings and `$`/backtick expansions. A word
//! made of more than one fragment becomes a `Concatenation` node whose
//! children are the fragments, left to right.

use crate::ast::types::{Node, NodeKind, AST};
use crate::parser::parser::Parser;
use crate::parser::types::is_metachar;

impl Parser {
    /// Parse one word. Returns `None` when the cursor is at a word boundary.
    pub(super) fn parse_word(&mut self) -> Option<Node> {
        let start = self.pos;
        let mut parts = Vec::new();
        while !self.at_word_end() {
            let before = self.pos;
            let part = self.parse_fragment();
            if self.pos == before {
                break;
            }
            parts.push(part);
        }

        if parts.len() <= 1 {
            return parts.pop();
        }
        let inner_text: String = parts.iter().map(|p| p.inner_text.as_str()).collect();
        let complete = parts.iter().all(|p| p.complete);
        let node = self.node(NodeKind::Concatenation, start, self.pos, complete, parts);
        Some(AST::with_inner_text(node, inner_text))
    }

    pub(super) fn at_word_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(b) => is_metachar(b) || (b == b'`' && self.in_backtick),
        }
    }

    fn parse_fragment(&mut self) -> Node {
        match self.peek() {
            Some(b'"') => self.parse_string(self.pos),
            Some(b'\'') => self.parse_raw_string(),
            Some(b'$') => self.parse_dollar(),
            Some(b'`') => self.parse_backtick_substitution(),
            _ => self.parse_unquoted(),
        }
    }

    /// Unquoted run up to the next word boundary or fragment start. A `$`
    /// that does not begin an expansion is literal.
    pub(super) fn parse_unquoted(&mut self) -> Node {
        let start = self.pos;
        let mut value = String::new();
        let mut complete = true;
        while let Some(b) = self.peek() {
            if is_metachar(b) || (b == b'`' && self.in_backtick) {
                break;
            }
            if self.pos > start
                && (matches!(b, b'"' | b'\'' | b'`')
                    || (b == b'$' && self.dollar_starts_expansion()))
            {
                break;
            }
            if b == b'\\' {
                self.bump(1);
                match self.peek() {
                    // Line continuation vanishes
                    Some(b'\n') => self.bump(1),
                    Some(_) => value.push(self.bump_char()),
                    None => {
                        value.push('\\');
                        complete = false;
                    }
                }
                continue;
            }
            value.push(self.bump_char());
        }
        let node = self.node(NodeKind::Word, start, self.pos, complete, Vec::new());
        AST::with_inner_text(node, value)
    }

    /// Double-quoted string; `start` is the opening quote, or the `$` of a
    /// `$"..."` locale string. The cursor must be on the quote.
    pub(super) fn parse_string(&mut self, start: usize) -> Node {
        self.bump(1);
        let mut children = Vec::new();
        let mut value = String::new();
        let mut complete = false;
        while let Some(b) = self.peek() {
            match b {
                b'"' => {
                    self.bump(1);
                    complete = true;
                    break;
                }
                b'\\' => {
                    self.bump(1);
                    match self.peek() {
                        Some(b'\n') => self.bump(1),
                        Some(c @ (b'"' | b'\\' | b'$' | b'`')) => {
                            self.bump(1);
                            value.push(c as char);
                        }
                        // Any other escape keeps its backslash
                        _ => value.push('\\'),
                    }
                }
                b'$' if self.dollar_starts_expansion_in_string() => {
                    let expansion = self.parse_dollar();
                    value.push_str(&expansion.text);
                    children.push(expansion);
                }
                b'`' if !self.in_backtick => {
                    let substitution = self.parse_backtick_substitution();
                    value.push_str(&substitution.text);
                    children.push(substitution);
                }
                _ => value.push(self.bump_char()),
            }
        }
        let node = self.node(NodeKind::String, start, self.pos, complete, children);
        AST::with_inner_text(node, value)
    }

    /// Single-quoted string: fully literal up to the next `'`.
    pub(super) fn parse_raw_string(&mut self) -> Node {
        let start = self.pos;
        self.bump(1);
        let content_start = self.pos;
        let (content_end, complete) = match self.input[content_start..].find('\'') {
            Some(offset) => (content_start + offset, true),
            None => (self.input.len(), false),
        };
        self.pos = if complete { content_end + 1 } else { content_end };
        let value = self.input[content_start..content_end].to_string();
        let node = self.node(NodeKind::RawString, start, self.pos, complete, Vec::new());
        AST::with_inner_text(node, value)
    }

    /// `$'...'` with backslash escapes decoded into `inner_text`.
    pub(super) fn parse_ansi_c_string(&mut self) -> Node {
        let start = self.pos;
        self.bump(2);
        let content_start = self.pos;
        let mut complete = false;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => {
                    self.bump(1);
                    if !self.at_end() {
                        self.bump_char();
                    }
                }
                b'\'' => {
                    complete = true;
                    break;
                }
                _ => {
                    self.bump_char();
                }
            }
        }
        let content_end = self.pos;
        if complete {
            self.bump(1);
        }
        let value = decode_ansi_c(&self.input[content_start..content_end]);
        let node = self.node(NodeKind::AnsiCString, start, self.pos, complete, Vec::new());
        AST::with_inner_text(node, value)
    }
}

// =============================================================================
// PURE STRING UTILITIES
// =============================================================================

/// Decode bytes as UTF-8, keeping each invalid byte as the Latin-1 character
/// of the same value (bash's behavior for `$'\xNN'` sequences).
fn decode_bytes_with_recovery(bytes: &[u8]) -> String {
    let mut result = String::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                result.push_str(valid);
                break;
            }
            Err(err) => {
                let valid = err.valid_up_to();
                result.push_str(std::str::from_utf8(&rest[..valid]).unwrap_or_default());
                result.push(rest[valid] as char);
                rest = &rest[valid + 1..];
            }
        }
    }
    result
}

/// Decode the body of an ANSI-C quoted string (without the `$'` and `'`).
pub fn decode_ansi_c(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch != '\\' || i + 1 >= chars.len() {
            result.push(ch);
            i += 1;
            continue;
        }

        let next = chars[i + 1];
        let simple = match next {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            '\\' => Some('\\'),
            '\'' => Some('\''),
            '"' => Some('"'),
            '?' => Some('?'),
            'a' => Some('\x07'),
            'b' => Some('\x08'),
            'e' | 'E' => Some('\x1b'),
            'f' => Some('\x0c'),
            'v' => Some('\x0b'),
            _ => None,
        };
        if let Some(decoded) = simple {
            result.push(decoded);
            i += 2;
            continue;
        }

        match next {
            'x' => {
                // Consecutive \xHH escapes form one byte sequence
                let mut bytes = Vec::new();
                let mut j = i;
                while j + 1 < chars.len() && chars[j] == '\\' && chars[j + 1] == 'x' {
                    let digits: String = chars[j + 2..]
                        .iter()
                        .take(2)
                        .take_while(|c| c.is_ascii_hexdigit())
                        .collect();
                    let Ok(byte) = u8::from_str_radix(&digits, 16) else {
                        break;
                    };
                    bytes.push(byte);
                    j += 2 + digits.len();
                }
                if bytes.is_empty() {
                    result.push_str("\\x");
                    i += 2;
                } else {
                    result.push_str(&decode_bytes_with_recovery(&bytes));
                    i = j;
                }
            }
            'u' | 'U' => {
                let max = if next == 'u' { 4 } else { 8 };
                let digits: String = chars[i + 2..]
                    .iter()
                    .take(max)
                    .take_while(|c| c.is_ascii_hexdigit())
                    .collect();
                match u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32) {
                    Some(decoded) => {
                        result.push(decoded);
                        i += 2 + digits.len();
                    }
                    None => {
                        result.push('\\');
                        result.push(next);
                        i += 2;
                    }
                }
            }
            'c' => match chars.get(i + 2) {
                // \cX: control character X & 0x1f
                Some(&ctrl) => {
                    result.push(char::from((ctrl as u32 & 0x1f) as u8));
                    i += 3;
                }
                None => {
                    result.push_str("\\c");
                    i += 2;
                }
            },
            '0'..='7' => {
                let digits: String = chars[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|c| ('0'..='7').contains(*c))
                    .collect();
                if let Ok(code) = u8::from_str_radix(&digits, 8) {
                    result.push(code as char);
                }
                i += 1 + digits.len();
            }
            _ => {
                // Unknown escape, keep the backslash
                result.push(ch);
                i += 1;
            }
        }
    }

    result
}
