//! Deterministic Finite Automaton (DFA) implementation with partition-refinement
//! minimization and trap elimination.

use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::{ALPHABET, SymbolId};
use log::trace;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// A Deterministic Finite Automaton over the binary alphabet.
///
/// While a trap state is recorded the DFA is complete. After
/// [`DFA::remove_trap`] missing transitions mean rejection.
#[derive(Debug, Clone)]
pub struct DFA {
    /// Number of states
    num_states: StateId,
    start_state: StateId,
    /// Final (accepting) states
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination
    transitions: HashMap<(StateId, SymbolId), StateId>,
    /// Absorbing non-accepting state, if any is recorded
    trap_state: Option<StateId>,
}

impl DFA {
    /// Create a new DFA with no states. The first added state is the start.
    pub fn new() -> Self {
        Self {
            num_states: 0,
            start_state: 0,
            final_states: StateSet::with_capacity(16),
            transitions: HashMap::new(),
            trap_state: None,
        }
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        id
    }

    /// Set the start state.
    pub fn set_start_state(&mut self, state: StateId) {
        debug_assert!(state < self.num_states);
        self.start_state = state;
    }

    /// Add a final (accepting) state.
    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Record `state` as the trap state.
    pub fn set_trap_state(&mut self, state: StateId) {
        debug_assert!(state < self.num_states);
        self.trap_state = Some(state);
    }

    /// Add a transition, replacing any previous one on the same symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        debug_assert!(source < self.num_states && destination < self.num_states);
        self.transitions.insert((source, symbol), destination);
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    /// Get the number of states.
    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    /// Get the start state.
    pub fn start_state(&self) -> StateId {
        self.start_state
    }

    /// Get the final states.
    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn is_final(&self, state: StateId) -> bool {
        self.final_states.contains(state)
    }

    pub fn trap_state(&self) -> Option<StateId> {
        self.trap_state
    }

    /// Whether `state` has at least one outgoing transition.
    pub fn has_transitions(&self, state: StateId) -> bool {
        ALPHABET
            .iter()
            .any(|&symbol| self.transition(state, symbol).is_some())
    }

    /// Whether every state has a transition on every symbol.
    pub fn is_complete(&self) -> bool {
        (0..self.num_states).all(|state| {
            ALPHABET
                .iter()
                .all(|&symbol| self.transition(state, symbol).is_some())
        })
    }

    /// Run `word` from `state`; `false` as soon as a transition is missing.
    pub fn accepts_from(&self, state: StateId, word: &[SymbolId]) -> bool {
        let mut current = state;
        for &symbol in word {
            match self.transition(current, symbol) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.is_final(current)
    }

    /// Check whether `word` is in the language.
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        self.num_states > 0 && self.accepts_from(self.start_state, word)
    }

    /// States reachable from the start, in breadth-first order with
    /// symbol 0 explored before symbol 1.
    pub fn reachable_states(&self) -> Vec<StateId> {
        let mut order = Vec::new();
        if self.num_states == 0 {
            return order;
        }

        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut queue = VecDeque::new();
        visited.insert(self.start_state);
        queue.push_back(self.start_state);

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for symbol in ALPHABET {
                if let Some(next) = self.transition(state, symbol) {
                    if visited.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        order
    }

    /// Minimize the DFA by partition refinement.
    /// Returns a new DFA with one state per equivalence class.
    ///
    /// States start split into accepting and non-accepting classes and are
    /// regrouped by (class, class of each successor) until a pass creates no
    /// new class. A missing transition counts as its own successor class, so
    /// partial DFAs are handled too. The trap's class becomes the new trap.
    pub fn minimize(&self) -> DFA {
        if self.num_states == 0 {
            return DFA::new();
        }

        let (mut partition, mut num_classes) = regroup(
            (0..self.num_states).map(|state| (usize::from(self.is_final(state)), Vec::new())),
        );
        let mut passes = 0;

        loop {
            let (refined, refined_classes) = regroup((0..self.num_states).map(|state| {
                let successors = ALPHABET
                    .iter()
                    .map(|&symbol| {
                        self.transition(state, symbol)
                            .map(|next| partition[next as usize])
                    })
                    .collect();
                (partition[state as usize], successors)
            }));
            passes += 1;
            trace!("refinement pass {passes}: {num_classes} -> {refined_classes} classes");

            // Classes only ever split, so an unchanged count means a fixpoint.
            let stable = refined_classes == num_classes;
            partition = refined;
            num_classes = refined_classes;
            if stable {
                break;
            }
        }

        self.build_minimized_dfa(&partition, num_classes)
    }

    /// Build a minimized DFA from a state -> class mapping.
    fn build_minimized_dfa(&self, partition: &[usize], num_classes: usize) -> DFA {
        let mut minimized = DFA::new();
        for _ in 0..num_classes {
            minimized.add_state();
        }

        // Lowest-numbered member of each class; any member would do.
        let mut representatives: Vec<Option<StateId>> = vec![None; num_classes];
        for (state, &class) in (0..self.num_states).zip(partition) {
            if representatives[class].is_none() {
                representatives[class] = Some(state);
            }
            if self.is_final(state) {
                minimized.add_final_state(class as StateId);
            }
        }

        for (class, representative) in representatives.iter().enumerate() {
            let Some(representative) = *representative else {
                continue;
            };
            for symbol in ALPHABET {
                if let Some(dest) = self.transition(representative, symbol) {
                    minimized.add_transition(
                        class as StateId,
                        symbol,
                        partition[dest as usize] as StateId,
                    );
                }
            }
        }

        minimized.set_start_state(partition[self.start_state as usize] as StateId);
        if let Some(trap) = self.trap_state {
            minimized.set_trap_state(partition[trap as usize] as StateId);
        }

        minimized
    }

    /// Remove the trap state: transitions into it become missing
    /// transitions, and the trap itself is left inert and unrecorded.
    /// Does nothing when no trap is recorded.
    pub fn remove_trap(mut self) -> DFA {
        let Some(trap) = self.trap_state.take() else {
            return self;
        };

        self.transitions
            .retain(|&(source, _), &mut dest| source != trap && dest != trap);
        let mut final_states = StateSet::with_capacity(self.num_states as usize);
        for state in self.final_states.iter().filter(|&state| state != trap) {
            final_states.insert(state);
        }
        self.final_states = final_states;

        self
    }
}

impl Default for DFA {
    fn default() -> Self {
        Self::new()
    }
}

/// Assign class IDs to states by key, numbering classes in key order.
/// Returns the per-state class and the number of classes.
fn regroup<I>(keys: I) -> (Vec<usize>, usize)
where
    I: Iterator<Item = (usize, Vec<Option<usize>>)>,
{
    let keys: Vec<_> = keys.collect();
    let mut classes: BTreeMap<&(usize, Vec<Option<usize>>), usize> = BTreeMap::new();
    for key in &keys {
        classes.insert(key, 0);
    }
    for (id, class) in classes.values_mut().enumerate() {
        *class = id;
    }
    let partition = keys.iter().map(|key| classes[key]).collect();
    (partition, classes.len())
}
