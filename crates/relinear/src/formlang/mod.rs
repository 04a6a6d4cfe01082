//! Formal language automata: from a binary regular expression to a minimal
//! DFA and its right-linear grammar.
//!
//! This module provides:
//! - A validating regex parser and expression tree
//! - Thompson construction of an epsilon-NFA
//! - Epsilon elimination with memoized closures
//! - Subset construction with a canonical trap state
//! - Partition-refinement DFA minimization and trap elimination
//! - Canonical state naming, table rendering and right-linear grammars

mod dfa;
mod epsilon_nfa;
mod epsilon_removal;
mod grammar;
mod nfa;
mod regex;
mod render;
mod state;
mod subset_construction;
mod symbol;
mod thompson;

pub use dfa::DFA;
pub use epsilon_nfa::EpsilonNFA;
pub use epsilon_removal::remove_epsilon;
pub use grammar::{Production, RightLinearGrammar, StateNames};
pub use nfa::NFA;
pub use regex::{Expr, MAX_NESTING, ParseError};
pub use render::{HEADER, NO_TRANSITION, RenderOptions, Table, render};
pub use state::{StateId, StateSet};
pub use subset_construction::subset_construction;
pub use symbol::{ALPHABET, EPSILON, SymbolId, symbol_from_char, symbol_to_char};
pub use thompson::thompson;
