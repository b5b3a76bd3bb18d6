//! Epsilon elimination: the standard construction producing a
//! language-equivalent automaton with no epsilon transitions.
//!
//! Epsilon moves taken *before* a real move are folded into that move, and
//! states that can epsilon-reach an accepting state become accepting
//! themselves. Destinations are not closed again: an epsilon move taken after
//! a real move belongs to the next composed transition in the simulation.

use crate::closure::EpsilonEdges;
use crate::types::{Automaton, State, Transition};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Builds the epsilon-free equivalent of `automaton`.
///
/// The input is borrowed and left untouched; the result is a fresh value
/// with:
///
/// * the same states and initial state (no reachability pruning),
/// * the alphabet minus the epsilon symbol,
/// * as finals every state whose epsilon closure meets the original finals,
/// * a transition `δ(p, a) → r` for every real transition `δ(q, a) → r`
///   with `q` in the epsilon closure of `p`.
///
/// Nondeterminism is preserved as-is; the result is neither determinized nor
/// minimized. The function is total over automata that satisfy the structural
/// invariants checked by the analyzer.
pub fn eliminate_epsilon(automaton: &Automaton) -> Automaton {
    let edges = EpsilonEdges::new(automaton);
    let closures: BTreeMap<State, BTreeSet<State>> = automaton
        .states
        .iter()
        .map(|&state| (state, edges.closure(state)))
        .collect();

    // Real (non-epsilon) transitions, indexed by origin.
    let mut moves: HashMap<State, Vec<&Transition>> = HashMap::new();
    for transition in &automaton.transitions {
        if !transition.symbol.is_epsilon() {
            moves.entry(transition.origin).or_default().push(transition);
        }
    }

    let alphabet = automaton
        .alphabet
        .iter()
        .filter(|symbol| !symbol.is_epsilon())
        .cloned()
        .collect();

    // δ(p, ε*) = q and δ(q, a) = r become δ(p, a) = r. A (p, a) pair whose
    // closure offers no real move simply contributes nothing.
    let mut transitions = BTreeSet::new();
    for (&origin, closure) in &closures {
        for reached in closure {
            for transition in moves.get(reached).into_iter().flatten() {
                transitions.insert(Transition::new(
                    origin,
                    transition.symbol.clone(),
                    transition.destination,
                ));
            }
        }
    }

    // δ(p, ε*) = f with f ∈ F makes p accepting.
    let finals = automaton
        .states
        .iter()
        .copied()
        .filter(|state| closures[state].iter().any(|q| automaton.finals.contains(q)))
        .collect();

    Automaton {
        states: automaton.states.clone(),
        alphabet,
        initial: automaton.initial,
        finals,
        transitions,
    }
}
