//! Regular expressions over the binary alphabet.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! union   := concat ('+' concat)*
//! concat  := star star*
//! star    := base '*'*
//! base    := '0' | '1' | '(' union ')'
//! ```
//!
//! Runs of `+` or of adjacent operands are folded into balanced trees and
//! repeated stars collapse, so tree depth grows with group nesting (capped at
//! [`MAX_NESTING`]) rather than with pattern length.

use crate::formlang::symbol::{SymbolId, symbol_from_char, symbol_to_char};
use std::fmt;
use thiserror::Error;

/// Deepest group nesting the parser accepts.
pub const MAX_NESTING: usize = 1024;

/// A node of a parsed regular expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single alphabet symbol.
    Symbol(SymbolId),
    /// `LR`
    Concat(Box<Expr>, Box<Expr>),
    /// `L+R`
    Union(Box<Expr>, Box<Expr>),
    /// `X*`
    Star(Box<Expr>),
}

impl Expr {
    pub fn symbol(symbol: SymbolId) -> Self {
        Expr::Symbol(symbol)
    }

    pub fn concat(left: Expr, right: Expr) -> Self {
        Expr::Concat(Box::new(left), Box::new(right))
    }

    pub fn union(left: Expr, right: Expr) -> Self {
        Expr::Union(Box::new(left), Box::new(right))
    }

    /// `X*`; starring a star returns it unchanged since `X**` is `X*`.
    pub fn star(inner: Expr) -> Self {
        match inner {
            Expr::Star(_) => inner,
            _ => Expr::Star(Box::new(inner)),
        }
    }

    /// Parse a pattern, rejecting anything outside the grammar.
    pub fn parse(pattern: &str) -> Result<Expr, ParseError> {
        Parser::new(pattern).parse()
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Expr::Symbol(_) => 1,
            Expr::Concat(left, right) | Expr::Union(left, right) => 1 + left.size() + right.size(),
            Expr::Star(inner) => 1 + inner.size(),
        }
    }
}

/// Writes a fully parenthesized pattern that parses back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(symbol) => write!(f, "{}", symbol_to_char(*symbol)),
            Expr::Concat(left, right) => write!(f, "({left}{right})"),
            Expr::Union(left, right) => write!(f, "({left}+{right})"),
            Expr::Star(inner) => write!(f, "({inner})*"),
        }
    }
}

/// Syntax errors. Offsets are byte positions into the pattern.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty pattern")]
    Empty,

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A `0`, `1` or `(` was required.
    #[error("expected an operand at offset {offset}")]
    ExpectedOperand { offset: usize },

    #[error("group opened at offset {offset} is never closed")]
    UnclosedGroup { offset: usize },

    #[error("unbalanced ')' at offset {offset}")]
    UnbalancedClose { offset: usize },

    #[error("group at offset {offset} is nested more than {max} deep", max = MAX_NESTING)]
    NestingTooDeep { offset: usize },
}

/// Join `operands` pairwise into a tree of depth `log2(len)`.
/// Splitting at the upper middle keeps two- and three-operand runs
/// left-associative.
fn balanced(mut operands: Vec<Expr>, join: fn(Expr, Expr) -> Expr) -> Option<Expr> {
    if operands.len() <= 1 {
        return operands.pop();
    }
    let right = operands.split_off(operands.len().div_ceil(2));
    Some(join(balanced(operands, join)?, balanced(right, join)?))
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<Expr, ParseError> {
        if self.input.is_empty() {
            return Err(ParseError::Empty);
        }
        let expr = self.parse_union()?;
        match self.peek() {
            None => Ok(expr),
            // parse_union only stops early on a closing paren
            Some(_) => Err(ParseError::UnbalancedClose { offset: self.pos }),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn parse_union(&mut self) -> Result<Expr, ParseError> {
        let offset = self.pos;
        let mut operands = vec![self.parse_concat()?];
        while self.peek() == Some('+') {
            self.bump();
            operands.push(self.parse_concat()?);
        }
        balanced(operands, Expr::union).ok_or(ParseError::ExpectedOperand { offset })
    }

    fn parse_concat(&mut self) -> Result<Expr, ParseError> {
        let offset = self.pos;
        let mut operands = vec![self.parse_star()?];
        while let Some(c) = self.peek() {
            if c == ')' || c == '+' {
                break;
            }
            operands.push(self.parse_star()?);
        }
        balanced(operands, Expr::concat).ok_or(ParseError::ExpectedOperand { offset })
    }

    fn parse_star(&mut self) -> Result<Expr, ParseError> {
        let mut node = self.parse_base()?;
        while self.peek() == Some('*') {
            self.bump();
            node = Expr::star(node);
        }
        Ok(node)
    }

    fn parse_base(&mut self) -> Result<Expr, ParseError> {
        let offset = self.pos;
        match self.peek() {
            Some('(') => {
                if self.depth >= MAX_NESTING {
                    return Err(ParseError::NestingTooDeep { offset });
                }
                self.bump();
                self.depth += 1;
                let node = self.parse_union()?;
                self.depth -= 1;
                if self.peek() != Some(')') {
                    return Err(ParseError::UnclosedGroup { offset });
                }
                self.bump();
                Ok(node)
            }
            None | Some('+' | '*' | ')') => Err(ParseError::ExpectedOperand { offset }),
            Some(ch) => {
                let symbol =
                    symbol_from_char(ch).ok_or(ParseError::UnexpectedChar { ch, offset })?;
                self.bump();
                Ok(Expr::symbol(symbol))
            }
        }
    }
}
