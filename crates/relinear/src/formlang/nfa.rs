//! Non-deterministic Finite Automaton without epsilon transitions.

use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::{SymbolId, is_epsilon};
use std::collections::HashMap;

/// A silent-free NFA with a single start state.
#[derive(Debug, Clone)]
pub struct NFA {
    num_states: StateId,
    start_state: StateId,
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states
    transitions: HashMap<(StateId, SymbolId), StateSet>,
}

impl NFA {
    /// Create an NFA with `num_states` states and no transitions.
    pub fn with_states(num_states: StateId, start_state: StateId) -> Self {
        debug_assert!(start_state < num_states);
        Self {
            num_states,
            start_state,
            final_states: StateSet::with_capacity(num_states as usize),
            transitions: HashMap::new(),
        }
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Add all of `destinations` as successors of `source` on `symbol`.
    pub fn add_transitions(&mut self, source: StateId, symbol: SymbolId, destinations: &StateSet) {
        assert!(!is_epsilon(symbol), "NFA cannot hold epsilon transitions");
        if destinations.is_empty() {
            return;
        }
        let capacity = self.num_states as usize;
        self.transitions
            .entry((source, symbol))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .union_with(destinations);
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    pub fn successors(&self, state: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    /// Get the states reachable from a set of states on a given symbol.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            if let Some(destinations) = self.successors(state, symbol) {
                reached.union_with(destinations);
            }
        }
        reached
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Check whether `word` is in the language.
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        let mut current = StateSet::singleton(self.start_state, self.num_states as usize);
        for &symbol in word {
            current = self.move_on_symbol(&current, symbol);
        }
        current.intersects(&self.final_states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_on_symbol() {
        // 0 -0-> {1, 2}, 1 -1-> 3, 2 -1-> 3
        let mut nfa = NFA::with_states(4, 0);
        nfa.add_transitions(0, 0, &[1, 2].into_iter().collect());
        nfa.add_transitions(1, 1, &StateSet::singleton(3, 4));
        nfa.add_transitions(2, 1, &StateSet::singleton(3, 4));
        nfa.add_final_state(3);

        let reached = nfa.move_on_symbol(&StateSet::singleton(0, 4), 0);
        assert_eq!(reached.to_vec(), vec![1, 2]);
        assert!(nfa.move_on_symbol(&reached, 0).is_empty());
        assert!(nfa.accepts(&[0, 1]));
        assert!(!nfa.accepts(&[0]));
    }

    #[test]
    fn test_empty_destinations_are_not_recorded() {
        let mut nfa = NFA::with_states(2, 0);
        nfa.add_transitions(0, 1, &StateSet::with_capacity(2));
        assert!(nfa.successors(0, 1).is_none());
        assert_eq!(nfa.transitions().count(), 0);
    }
}
