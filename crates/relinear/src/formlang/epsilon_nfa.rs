//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.

use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::{ALPHABET, EPSILON, SymbolId, is_epsilon};
use std::collections::HashMap;

/// An Epsilon Non-deterministic Finite Automaton with a single start state.
#[derive(Debug, Clone)]
pub struct EpsilonNFA {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states
    /// For epsilon transitions, symbol == EPSILON
    transitions: HashMap<(StateId, SymbolId), StateSet>,
}

impl EpsilonNFA {
    /// Create a new epsilon-NFA with no states.
    pub fn new() -> Self {
        Self {
            num_states: 0,
            start_state: 0,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        debug_assert!(source < self.num_states && destination < self.num_states);
        let capacity = self.num_states as usize;
        self.transitions
            .entry((source, symbol))
            .or_insert_with(|| StateSet::with_capacity(capacity))
            .insert(destination);
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    pub fn set_start_state(&mut self, state: StateId) {
        debug_assert!(state < self.num_states);
        self.start_state = state;
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        debug_assert!(state < self.num_states);
        self.final_states.insert(state);
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Direct successors of `state` on `symbol` (no closure applied).
    pub fn successors(&self, state: StateId, symbol: SymbolId) -> Option<&StateSet> {
        self.transitions.get(&(state, symbol))
    }

    /// Compute the epsilon closure of a single state using DFS.
    ///
    /// `known` holds closures that are already complete; reaching one of
    /// those states merges its closure instead of walking through it again.
    fn epsilon_closure_single(&self, state: StateId, known: &[Option<StateSet>]) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        let mut stack = vec![state];

        while let Some(s) = stack.pop() {
            if !closure.insert(s) {
                continue;
            }
            if let Some(Some(done)) = known.get(s as usize) {
                closure.union_with(done);
                continue;
            }

            // Follow epsilon transitions
            if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                stack.extend(destinations.iter().filter(|&dest| !closure.contains(dest)));
            }
        }

        closure
    }

    /// Compute the epsilon closure of every state, indexed by state ID.
    pub fn epsilon_closures(&self) -> Vec<StateSet> {
        let mut known: Vec<Option<StateSet>> = vec![None; self.num_states as usize];
        for state in 0..self.num_states {
            let closure = self.epsilon_closure_single(state, &known);
            known[state as usize] = Some(closure);
        }
        known.into_iter().flatten().collect()
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);
        for state in states.iter() {
            closure.union_with(&self.epsilon_closure_single(state, &[]));
        }
        closure
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Number of epsilon transitions.
    pub fn num_epsilon_transitions(&self) -> usize {
        self.transitions()
            .filter(|&(_, sym, _)| is_epsilon(sym))
            .count()
    }

    /// Check whether `word` is in the language, following epsilon moves freely.
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        if self.num_states == 0 {
            return false;
        }
        let mut current = self.epsilon_closure(&StateSet::singleton(
            self.start_state,
            self.num_states as usize,
        ));
        for &symbol in word {
            debug_assert!(ALPHABET.contains(&symbol));
            let mut reached = StateSet::with_capacity(self.num_states as usize);
            for state in current.iter() {
                if let Some(destinations) = self.successors(state, symbol) {
                    reached.union_with(destinations);
                }
            }
            current = self.epsilon_closure(&reached);
        }
        current.intersects(&self.final_states)
    }
}

impl Default for EpsilonNFA {
    fn default() -> Self {
        Self::new()
    }
}
