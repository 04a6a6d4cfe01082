//! Subset construction algorithm for converting a silent-free NFA to a DFA.

use crate::formlang::dfa::DFA;
use crate::formlang::nfa::NFA;
use crate::formlang::state::{StateId, StateSet};
use crate::formlang::symbol::ALPHABET;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Convert an NFA to a complete DFA using the powerset construction algorithm.
///
/// DFA state 0 is the subset `{start}`. The empty subset is registered up
/// front as the trap state (state 1), so every missing NFA move lands there.
/// Subsets are discovered breadth-first, which makes the numbering
/// reproducible.
pub fn subset_construction(nfa: &NFA) -> DFA {
    // Each DFA state corresponds to a set of NFA states
    // We map sets of NFA states to DFA state IDs
    let mut state_mapping: IndexMap<Vec<StateId>, StateId> = IndexMap::new();
    let mut dfa = DFA::new();
    let mut worklist: VecDeque<StateSet> = VecDeque::new();

    let initial_set = StateSet::singleton(nfa.start_state(), nfa.num_states() as usize);
    let initial_dfa_state = dfa.add_state();
    state_mapping.insert(initial_set.to_vec(), initial_dfa_state);
    dfa.set_start_state(initial_dfa_state);
    worklist.push_back(initial_set);

    let trap = dfa.add_state();
    state_mapping.insert(Vec::new(), trap);
    dfa.set_trap_state(trap);
    for symbol in ALPHABET {
        dfa.add_transition(trap, symbol, trap);
    }

    while let Some(current_nfa_set) = worklist.pop_front() {
        let current_dfa_state = state_mapping[&current_nfa_set.to_vec()];

        if current_nfa_set.intersects(nfa.final_states()) {
            dfa.add_final_state(current_dfa_state);
        }

        for symbol in ALPHABET {
            let next_nfa_set = nfa.move_on_symbol(&current_nfa_set, symbol);
            let next_vec = next_nfa_set.to_vec();

            // Check if we've seen this DFA state before
            let next_dfa_state = match state_mapping.get(&next_vec) {
                Some(&existing) => existing,
                None => {
                    let new_state = dfa.add_state();
                    state_mapping.insert(next_vec, new_state);
                    worklist.push_back(next_nfa_set);
                    new_state
                }
            };

            dfa.add_transition(current_dfa_state, symbol, next_dfa_state);
        }
    }

    dfa
}
