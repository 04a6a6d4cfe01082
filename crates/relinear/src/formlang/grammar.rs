//! Right-linear grammars read off a trimmed DFA.

use crate::formlang::dfa::DFA;
use crate::formlang::state::StateId;
use crate::formlang::symbol::{ALPHABET, SymbolId, symbol_to_char};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Canonical names `q0, q1, ...` for the reachable states of a DFA,
/// assigned breadth-first from the start state with symbol 0 first.
#[derive(Debug, Clone)]
pub struct StateNames {
    order: Vec<StateId>,
    index: HashMap<StateId, usize>,
}

impl StateNames {
    pub fn assign(dfa: &DFA) -> Self {
        let order = dfa.reachable_states();
        let index = order
            .iter()
            .enumerate()
            .map(|(position, &state)| (state, position))
            .collect();
        Self { order, index }
    }

    /// Name of `state`, or `None` if it is unreachable.
    pub fn name(&self, state: StateId) -> Option<String> {
        self.index.get(&state).map(|position| format!("q{position}"))
    }

    /// Named states in canonical order.
    pub fn states(&self) -> &[StateId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// `head -> symbol tail`, or `head -> symbol` when `tail` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub head: String,
    pub symbol: SymbolId,
    pub tail: Option<String>,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.head, symbol_to_char(self.symbol))?;
        if let Some(tail) = &self.tail {
            f.write_str(tail)?;
        }
        Ok(())
    }
}

/// A right-linear grammar whose nonterminals are DFA state names.
///
/// No production derives the empty word, even when the start state accepts.
#[derive(Debug, Clone)]
pub struct RightLinearGrammar {
    start: String,
    productions: Vec<Production>,
}

impl RightLinearGrammar {
    /// Read the grammar off `dfa` using the canonical state names.
    ///
    /// For each named state and each symbol with a transition `S -c-> T`:
    /// `S->cT` unless `T` is an accepting state with no outgoing transitions,
    /// then `S->c` if `T` accepts.
    pub fn from_dfa(dfa: &DFA, names: &StateNames) -> Self {
        let mut productions = Vec::new();

        for &state in names.states() {
            let Some(head) = names.name(state) else {
                continue;
            };
            for symbol in ALPHABET {
                let Some(next) = dfa.transition(state, symbol) else {
                    continue;
                };
                let Some(tail) = names.name(next) else {
                    continue;
                };
                let accepting = dfa.is_final(next);

                if !(accepting && !dfa.has_transitions(next)) {
                    productions.push(Production {
                        head: head.clone(),
                        symbol,
                        tail: Some(tail),
                    });
                }
                if accepting {
                    productions.push(Production {
                        head: head.clone(),
                        symbol,
                        tail: None,
                    });
                }
            }
        }

        Self {
            start: names.name(dfa.start_state()).unwrap_or_else(|| "q0".to_owned()),
            productions,
        }
    }

    /// The start nonterminal.
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Whether `word` can be derived from the start nonterminal.
    pub fn derives(&self, word: &[SymbolId]) -> bool {
        let Some((&last, prefix)) = word.split_last() else {
            return false;
        };

        let mut current: HashSet<&str> = HashSet::from([self.start.as_str()]);
        for &symbol in prefix {
            current = self
                .productions
                .iter()
                .filter(|p| p.symbol == symbol && current.contains(p.head.as_str()))
                .filter_map(|p| p.tail.as_deref())
                .collect();
            if current.is_empty() {
                return false;
            }
        }

        self.productions
            .iter()
            .any(|p| p.symbol == last && p.tail.is_none() && current.contains(p.head.as_str()))
    }
}

impl fmt::Display for RightLinearGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for production in &self.productions {
            writeln!(f, "{production}")?;
        }
        Ok(())
    }
}
