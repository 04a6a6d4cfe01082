//! Text rendering of a trimmed DFA and its right-linear grammar.

use crate::formlang::dfa::DFA;
use crate::formlang::grammar::{RightLinearGrammar, StateNames};
use crate::formlang::state::StateId;
use crate::formlang::symbol::SymbolId;
use std::fmt;

/// Column header of the transition table.
pub const HEADER: &str = "      0 1";

/// Printed in place of a successor when there is no transition.
pub const NO_TRANSITION: &str = "N";

/// Which sections [`render`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub table: bool,
    pub grammar: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table: true,
            grammar: true,
        }
    }
}

/// Transition table rows for the named states, one per line.
pub struct Table<'a> {
    dfa: &'a DFA,
    names: &'a StateNames,
}

impl<'a> Table<'a> {
    pub fn new(dfa: &'a DFA, names: &'a StateNames) -> Self {
        Self { dfa, names }
    }

    fn successor(&self, state: StateId, symbol: SymbolId) -> String {
        self.dfa
            .transition(state, symbol)
            .and_then(|next| self.names.name(next))
            .unwrap_or_else(|| NO_TRANSITION.to_owned())
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HEADER}")?;
        for &state in self.names.states() {
            if state == self.dfa.start_state() {
                f.write_str("(s)")?;
            }
            if self.dfa.is_final(state) {
                f.write_str("(e)")?;
            }
            let name = self.names.name(state).unwrap_or_default();
            writeln!(
                f,
                "{name} {} {}",
                self.successor(state, 0),
                self.successor(state, 1)
            )?;
        }
        Ok(())
    }
}

/// Render `dfa` as a transition table, a blank line, and its grammar.
pub fn render(dfa: &DFA, options: RenderOptions) -> String {
    let names = StateNames::assign(dfa);
    let mut out = String::new();

    if options.table {
        out.push_str(&Table::new(dfa, &names).to_string());
    }
    if options.table && options.grammar {
        out.push('\n');
    }
    if options.grammar {
        out.push_str(&RightLinearGrammar::from_dfa(dfa, &names).to_string());
    }

    out
}
