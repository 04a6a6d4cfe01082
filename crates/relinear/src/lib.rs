//! Compile regular expressions over `{0, 1}` into minimal DFAs and
//! equivalent right-linear grammars.
//!
//! The pipeline runs parse, Thompson construction, epsilon elimination,
//! subset construction, minimization and trap elimination. Each stage
//! builds a fresh automaton from the previous one.

pub mod error;
pub mod formlang;
pub mod logging;

use crate::error::{Error, Result};
use crate::formlang::{
    DFA, Expr, RenderOptions, remove_epsilon, render, subset_construction, thompson,
};
use log::debug;

/// Parse `pattern` and compile it to a minimal DFA without a trap state.
pub fn compile(pattern: &str) -> Result<DFA> {
    let expr = Expr::parse(pattern).map_err(|source| Error::Parse {
        pattern: pattern.to_owned(),
        source,
    })?;
    debug!("parsed {pattern:?} into {} nodes", expr.size());
    Ok(compile_expr(&expr))
}

/// Compile an already validated expression tree to a minimal DFA without a
/// trap state.
pub fn compile_expr(expr: &Expr) -> DFA {
    let enfa = thompson(expr);
    debug!(
        "thompson: {} states, {} epsilon transitions",
        enfa.num_states(),
        enfa.num_epsilon_transitions()
    );

    let nfa = remove_epsilon(&enfa);
    debug!(
        "epsilon removal: {} states, {} transitions",
        nfa.num_states(),
        nfa.transitions().count()
    );

    let dfa = subset_construction(&nfa);
    debug!(
        "subset construction: {} states, trap {:?}",
        dfa.num_states(),
        dfa.trap_state()
    );

    let minimized = dfa.minimize();
    debug!(
        "minimization: {} -> {} states, trap {:?}",
        dfa.num_states(),
        minimized.num_states(),
        minimized.trap_state()
    );

    let trimmed = minimized.remove_trap();
    debug!(
        "trap removal: {} reachable states",
        trimmed.reachable_states().len()
    );
    trimmed
}

/// Compile `pattern` and render its table and grammar.
pub fn compile_and_render(pattern: &str, options: RenderOptions) -> Result<String> {
    let dfa = compile(pattern)?;
    Ok(render(&dfa, options))
}
