//! Thompson construction: regular expression to ε-NFA.

use crate::formlang::epsilon_nfa::EpsilonNFA;
use crate::formlang::regex::Expr;
use crate::formlang::state::StateId;

/// Entry and exit state of a partially built automaton.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    entry: StateId,
    exit: StateId,
}

/// Build an ε-NFA whose language is the denotation of `expr`.
///
/// The result has exactly one final state, the exit of the outermost fragment.
pub fn thompson(expr: &Expr) -> EpsilonNFA {
    let mut nfa = EpsilonNFA::new();
    let fragment = build_fragment(&mut nfa, expr);
    nfa.set_start_state(fragment.entry);
    nfa.add_final_state(fragment.exit);
    nfa
}

fn build_fragment(nfa: &mut EpsilonNFA, expr: &Expr) -> Fragment {
    match expr {
        Expr::Symbol(symbol) => {
            let entry = nfa.add_state();
            let exit = nfa.add_state();
            nfa.add_transition(entry, *symbol, exit);
            Fragment { entry, exit }
        }
        Expr::Concat(left, right) => {
            let left = build_fragment(nfa, left);
            let right = build_fragment(nfa, right);
            nfa.add_epsilon_transition(left.exit, right.entry);
            Fragment {
                entry: left.entry,
                exit: right.exit,
            }
        }
        Expr::Union(left, right) => {
            let entry = nfa.add_state();
            let exit = nfa.add_state();
            let left = build_fragment(nfa, left);
            let right = build_fragment(nfa, right);
            nfa.add_epsilon_transition(entry, left.entry);
            nfa.add_epsilon_transition(entry, right.entry);
            nfa.add_epsilon_transition(left.exit, exit);
            nfa.add_epsilon_transition(right.exit, exit);
            Fragment { entry, exit }
        }
        Expr::Star(inner) => {
            let entry = nfa.add_state();
            let exit = nfa.add_state();
            let inner = build_fragment(nfa, inner);
            nfa.add_epsilon_transition(entry, inner.entry);
            nfa.add_epsilon_transition(inner.exit, exit);
            nfa.add_epsilon_transition(entry, exit);
            nfa.add_epsilon_transition(inner.exit, inner.entry);
            Fragment { entry, exit }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(pattern: &str) -> EpsilonNFA {
        thompson(&Expr::parse(pattern).unwrap())
    }

    #[test]
    fn test_symbol_fragment() {
        let nfa = build("1");
        assert_eq!(nfa.num_states(), 2);
        assert_eq!(nfa.start_state(), 0);
        assert_eq!(nfa.final_states().to_vec(), vec![1]);
        assert_eq!(nfa.transitions().collect::<Vec<_>>(), vec![(0, 1, 1)]);
    }

    #[test]
    fn test_state_and_epsilon_counts() {
        // concat: 2 + 2 states, one ε
        let nfa = build("01");
        assert_eq!(nfa.num_states(), 4);
        assert_eq!(nfa.num_epsilon_transitions(), 1);

        // union: 2 + 2 + 2 states, four ε
        let nfa = build("0+1");
        assert_eq!(nfa.num_states(), 6);
        assert_eq!(nfa.num_epsilon_transitions(), 4);

        // star: 2 + 2 states, four ε
        let nfa = build("0*");
        assert_eq!(nfa.num_states(), 4);
        assert_eq!(nfa.num_epsilon_transitions(), 4);
    }

    #[test]
    fn test_single_final_state() {
        for pattern in ["0", "(0+1)*", "0(10)*+1*1"] {
            assert_eq!(build(pattern).final_states().len(), 1, "{pattern}");
        }
    }

    #[test]
    fn test_language() {
        let nfa = build("0(10)*+1*1");
        assert!(nfa.accepts(&[0]));
        assert!(nfa.accepts(&[0, 1, 0]));
        assert!(nfa.accepts(&[0, 1, 0, 1, 0]));
        assert!(nfa.accepts(&[1]));
        assert!(nfa.accepts(&[1, 1, 1]));
        assert!(!nfa.accepts(&[]));
        assert!(!nfa.accepts(&[0, 1]));
        assert!(!nfa.accepts(&[1, 0]));
    }

    #[test]
    fn test_star_accepts_empty_word() {
        let nfa = build("(01)*");
        assert!(nfa.accepts(&[]));
        assert!(nfa.accepts(&[0, 1, 0, 1]));
        assert!(!nfa.accepts(&[0]));
    }
}
