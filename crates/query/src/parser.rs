//! Search-string parser.
//!
//! Turns a Google-style search string into a [`ParseTree`].
//!
//! # Grammar
//!
//! ```text
//! search        = sep* item (sep+ item)* sep*
//! item          = filter / term
//! sep           = " "
//! term          = "-" positive-term / positive-term
//! positive-term = DQUOTE 1*(any except DQUOTE) DQUOTE    ; literal
//!               / 1*(any except DQUOTE, " ", "-")        ; non-literal
//! filter        = ["-"] filter-name ":" value *("," [value])
//! filter-name   = registered name, e.g. "planner"
//! value         = 1*ALPHA
//! ```
//!
//! Filters are tried first. A filter is only accepted when it ends at a
//! separator or the end of input; otherwise the item is re-read as a term, so
//! `planner:abc1` and `buyer:x` are plain terms and `planner: x` is the term
//! `planner:` followed by `x`.
//!
//! # Example
//!
//! ```
//! use partsearch_query::parser::SearchParser;
//! use partsearch_query::types::Node;
//!
//! let tree = SearchParser::parse("bias \"unit\" -orbit planner:jelliott").unwrap();
//! assert_eq!(tree.len(), 4);
//! assert!(matches!(tree.nodes()[3], Node::Filter(_)));
//! ```

use crate::error::ParseError;
use crate::registry::{FILTER_REGISTRY, FilterKind};
use crate::types::{FilterClause, Node, ParseTree, TermNode};

const SEPARATOR: char = ' ';
const QUOTE: char = '"';
const NEGATION: char = '-';

/// Recursive-descent parser over one search string.
pub struct SearchParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SearchParser<'a> {
    /// Creates a new parser.
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Parses the entire search string.
    ///
    /// Blank input yields an empty tree.
    pub fn parse(input: &str) -> Result<ParseTree, ParseError> {
        if input.trim().is_empty() {
            return Ok(ParseTree::default());
        }

        let mut parser = SearchParser::new(input);
        let mut nodes = Vec::new();

        parser.skip_separators();
        loop {
            nodes.push(parser.parse_item()?);

            if parser.at_end() {
                break;
            }
            if parser.peek() != Some(SEPARATOR) {
                return Err(parser.error("Expected a space between search terms"));
            }
            parser.skip_separators();
            if parser.at_end() {
                break;
            }
        }

        Ok(ParseTree::new(nodes))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_separators(&mut self) {
        while self.peek() == Some(SEPARATOR) {
            self.pos += 1;
        }
    }

    /// Whether the next item boundary (separator or end) is at the cursor.
    fn at_boundary(&self) -> bool {
        matches!(self.peek(), None | Some(SEPARATOR))
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::at(self.input, self.pos, message)
    }

    /// Parses one item, preferring a filter clause.
    fn parse_item(&mut self) -> Result<Node, ParseError> {
        let start = self.pos;
        if let Some(filter) = self.parse_filter() {
            return Ok(Node::Filter(filter));
        }
        self.pos = start;
        self.parse_term().map(Node::Term)
    }

    /// Attempts to parse a filter clause, leaving the cursor anywhere on failure.
    fn parse_filter(&mut self) -> Option<FilterClause> {
        let negated = self.peek() == Some(NEGATION);
        if negated {
            self.consume();
        }

        let kind = self.parse_filter_name()?;

        let mut values = vec![self.parse_filter_value()?];
        while self.peek() == Some(',') {
            self.consume();
            // Empty slots between commas are allowed and dropped.
            if let Some(value) = self.parse_filter_value() {
                values.push(value);
            }
        }

        if !self.at_boundary() {
            return None;
        }

        Some(FilterClause {
            kind,
            negated,
            values,
        })
    }

    /// Matches a registered name immediately followed by `:`.
    fn parse_filter_name(&mut self) -> Option<FilterKind> {
        let rest = &self.input[self.pos..];
        let def = FILTER_REGISTRY.iter().find(|def| {
            rest.strip_prefix(def.name)
                .is_some_and(|after| after.starts_with(':'))
        })?;
        self.pos += def.name.len() + 1;
        Some(def.kind)
    }

    /// Parses `1*ALPHA`.
    fn parse_filter_value(&mut self) -> Option<String> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.pos += 1;
        }
        if self.pos == start {
            None
        } else {
            Some(self.input[start..self.pos].to_string())
        }
    }

    /// Parses an optionally negated term.
    fn parse_term(&mut self) -> Result<TermNode, ParseError> {
        let negated = self.peek() == Some(NEGATION);
        if negated {
            self.consume();
        }

        let term = match self.peek() {
            Some(QUOTE) => self.parse_literal()?,
            Some(c) if c != SEPARATOR && c != NEGATION => self.parse_word()?,
            _ => {
                let message = if negated {
                    "Expected a term after '-'"
                } else {
                    "Expected a term"
                };
                return Err(self.error(message));
            }
        };

        Ok(if negated { term.negate() } else { term })
    }

    /// Parses a quoted term.
    fn parse_literal(&mut self) -> Result<TermNode, ParseError> {
        let open = self.pos;
        self.consume(); // consume opening quote
        let start = self.pos;

        let Some(len) = self.input[start..].find(QUOTE) else {
            return Err(ParseError::at(self.input, open, "Unterminated quoted term"));
        };
        if len == 0 {
            return Err(ParseError::at(self.input, open, "Empty quoted term"));
        }

        self.pos = start + len + 1;
        Ok(TermNode::literal(&self.input[start..start + len]))
    }

    /// Parses an unquoted term.
    fn parse_word(&mut self) -> Result<TermNode, ParseError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == QUOTE || c == SEPARATOR || c == NEGATION {
                break;
            }
            self.consume();
        }
        if self.pos == start {
            return Err(self.error("Expected a term"));
        }
        Ok(TermNode::word(&self.input[start..self.pos]))
    }
}
