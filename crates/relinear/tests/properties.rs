//! Property-based tests for the regex -> DFA -> grammar pipeline.
//!
//! Every compiled automaton is checked against a naive backtracking matcher
//! over all words up to a bounded length, for minimality with a
//! table-filling pass, and against its own grammar.

use proptest::prelude::*;
use relinear::compile_expr;
use relinear::formlang::{
    ALPHABET, DFA, Expr, RenderOptions, RightLinearGrammar, StateId, StateNames, SymbolId,
    remove_epsilon, render, subset_construction, thompson,
};
use std::collections::{BTreeSet, HashMap};

const MAX_WORD_LEN: usize = 6;

// Strategy for generating expression trees
fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![Just(Expr::symbol(0)), Just(Expr::symbol(1))];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::concat(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Expr::union(l, r)),
            inner.prop_map(Expr::star),
        ]
    })
}

/// All words over {0,1} of length at most `max_len`, shortest first.
fn all_words(max_len: usize) -> Vec<Vec<SymbolId>> {
    let mut words = vec![Vec::new()];
    let mut frontier = vec![Vec::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for word in &frontier {
            for symbol in ALPHABET {
                let mut longer: Vec<SymbolId> = word.clone();
                longer.push(symbol);
                next.push(longer);
            }
        }
        words.extend(next.iter().cloned());
        frontier = next;
    }
    words
}

// Helper: positions reachable after matching `expr` from `start`
fn match_ends(expr: &Expr, word: &[SymbolId], start: usize) -> BTreeSet<usize> {
    match expr {
        Expr::Symbol(symbol) => {
            let mut ends = BTreeSet::new();
            if word.get(start) == Some(symbol) {
                ends.insert(start + 1);
            }
            ends
        }
        Expr::Concat(left, right) => match_ends(left, word, start)
            .into_iter()
            .flat_map(|mid| match_ends(right, word, mid))
            .collect(),
        Expr::Union(left, right) => {
            let mut ends = match_ends(left, word, start);
            ends.extend(match_ends(right, word, start));
            ends
        }
        Expr::Star(inner) => {
            let mut ends = BTreeSet::from([start]);
            let mut pending = vec![start];
            while let Some(position) = pending.pop() {
                for end in match_ends(inner, word, position) {
                    if ends.insert(end) {
                        pending.push(end);
                    }
                }
            }
            ends
        }
    }
}

fn naive_matches(expr: &Expr, word: &[SymbolId]) -> bool {
    match_ends(expr, word, 0).contains(&word.len())
}

/// Table-filling over the reachable states plus an explicit dead sink
/// standing in for missing transitions. Returns pairs left unmarked.
fn equivalent_pairs(dfa: &DFA) -> Vec<(Option<StateId>, Option<StateId>)> {
    let mut states: Vec<Option<StateId>> = dfa.reachable_states().into_iter().map(Some).collect();
    states.push(None);
    let index: HashMap<Option<StateId>, usize> =
        states.iter().enumerate().map(|(i, &s)| (s, i)).collect();
    let accepting = |s: Option<StateId>| s.is_some_and(|s| dfa.is_final(s));
    let step = |s: Option<StateId>, symbol| s.and_then(|s| dfa.transition(s, symbol));

    let n = states.len();
    let mut marked = vec![vec![false; n]; n];
    for i in 0..n {
        for j in 0..n {
            marked[i][j] = accepting(states[i]) != accepting(states[j]);
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..n {
            for j in 0..n {
                if marked[i][j] {
                    continue;
                }
                let split = ALPHABET.iter().any(|&symbol| {
                    let a = index[&step(states[i], symbol)];
                    let b = index[&step(states[j], symbol)];
                    marked[a][b]
                });
                if split {
                    marked[i][j] = true;
                    changed = true;
                }
            }
        }
    }

    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if !marked[i][j] {
                pairs.push((states[i], states[j]));
            }
        }
    }
    pairs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_dfa_matches_naive_semantics(expr in expr_strategy()) {
        let dfa = compile_expr(&expr);
        for word in all_words(MAX_WORD_LEN) {
            prop_assert_eq!(
                dfa.accepts(&word),
                naive_matches(&expr, &word),
                "pattern {} on {:?}", expr, word
            );
        }
    }

    #[test]
    fn prop_every_stage_preserves_the_language(expr in expr_strategy()) {
        let enfa = thompson(&expr);
        let nfa = remove_epsilon(&enfa);
        let dfa = subset_construction(&nfa);
        let minimized = dfa.minimize();

        prop_assert!(dfa.is_complete());
        prop_assert!(minimized.is_complete());
        prop_assert!(minimized.num_states() <= dfa.num_states());

        for word in all_words(4) {
            let expected = naive_matches(&expr, &word);
            prop_assert_eq!(enfa.accepts(&word), expected);
            prop_assert_eq!(nfa.accepts(&word), expected);
            prop_assert_eq!(dfa.accepts(&word), expected);
            prop_assert_eq!(minimized.accepts(&word), expected);
        }
    }

    #[test]
    fn prop_result_is_minimal(expr in expr_strategy()) {
        let dfa = compile_expr(&expr);
        let pairs = equivalent_pairs(&dfa);
        prop_assert!(pairs.is_empty(), "pattern {} has equivalent states {:?}", expr, pairs);
    }

    #[test]
    fn prop_minimize_is_idempotent(expr in expr_strategy()) {
        let dfa = compile_expr(&expr);
        let again = dfa.minimize().remove_trap();
        prop_assert_eq!(
            render(&dfa, RenderOptions::default()),
            render(&again, RenderOptions::default())
        );

        let with_trap = subset_construction(&remove_epsilon(&thompson(&expr))).minimize();
        let twice = with_trap.minimize();
        prop_assert_eq!(with_trap.num_states(), twice.num_states());
        prop_assert_eq!(
            render(&with_trap.remove_trap(), RenderOptions::default()),
            render(&twice.remove_trap(), RenderOptions::default())
        );
    }

    #[test]
    fn prop_grammar_derives_accepted_words(expr in expr_strategy()) {
        let dfa = compile_expr(&expr);
        let grammar = RightLinearGrammar::from_dfa(&dfa, &StateNames::assign(&dfa));
        for word in all_words(MAX_WORD_LEN).into_iter().filter(|w| !w.is_empty()) {
            prop_assert_eq!(
                grammar.derives(&word),
                dfa.accepts(&word),
                "pattern {} on {:?}", expr, word
            );
        }
    }

    #[test]
    fn prop_display_round_trips(expr in expr_strategy()) {
        prop_assert_eq!(Expr::parse(&expr.to_string()).unwrap(), expr);
    }

    #[test]
    fn prop_parser_never_panics(pattern in "[01+*()]{0,10}") {
        if let Ok(expr) = Expr::parse(&pattern) {
            let dfa = compile_expr(&expr);
            prop_assert!(dfa.trap_state().is_none());
        }
    }
}

#[test]
fn test_all_words_count() {
    assert_eq!(all_words(3).len(), 1 + 2 + 4 + 8);
}

#[test]
fn test_naive_matcher() {
    let expr = Expr::parse("(01)*0").unwrap();
    assert!(naive_matches(&expr, &[0]));
    assert!(naive_matches(&expr, &[0, 1, 0]));
    assert!(!naive_matches(&expr, &[0, 1]));
    assert!(!naive_matches(&expr, &[]));
}
