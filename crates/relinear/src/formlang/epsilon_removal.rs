//! Silent-transition elimination: ε-NFA to NFA over the same states.

use crate::formlang::epsilon_nfa::EpsilonNFA;
use crate::formlang::nfa::NFA;
use crate::formlang::state::StateSet;
use crate::formlang::symbol::ALPHABET;

/// Rewrite `enfa` into an equivalent NFA with no epsilon transitions.
///
/// State `s` of the result is final iff its epsilon closure holds a final
/// state, and its successors on `c` are the closures of every `c`-successor
/// of every state in the closure of `s`. State numbering is preserved.
pub fn remove_epsilon(enfa: &EpsilonNFA) -> NFA {
    let closures = enfa.epsilon_closures();
    let mut nfa = NFA::with_states(enfa.num_states(), enfa.start_state());

    for (state, closure) in (0..enfa.num_states()).zip(&closures) {
        if closure.intersects(enfa.final_states()) {
            nfa.add_final_state(state);
        }

        for symbol in ALPHABET {
            // Gather distinct targets first so each closure is merged once.
            let mut targets = StateSet::with_capacity(enfa.num_states() as usize);
            for member in closure.iter() {
                if let Some(destinations) = enfa.successors(member, symbol) {
                    targets.union_with(destinations);
                }
            }
            if targets.is_empty() {
                continue;
            }

            let mut combined = StateSet::with_capacity(enfa.num_states() as usize);
            for next in targets.iter() {
                if !combined.contains(next) {
                    combined.union_with(&closures[next as usize]);
                }
            }
            nfa.add_transitions(state, symbol, &combined);
        }
    }

    nfa
}
