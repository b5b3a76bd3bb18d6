//! Epsilon-closure computation: the set of states reachable from a given
//! state using epsilon transitions only.

use crate::types::{Automaton, State};
use std::collections::{BTreeSet, HashMap};

/// An index of the epsilon edges of an automaton, keyed by origin state.
///
/// Built once in O(|transitions|); afterwards each closure expansion only
/// touches the outgoing epsilon edges of the state being expanded instead of
/// rescanning the whole relation. `eliminate_epsilon` shares one index across
/// all states.
pub(crate) struct EpsilonEdges {
    edges: HashMap<State, Vec<State>>,
}

impl EpsilonEdges {
    /// Indexes the epsilon transitions of `automaton` by origin.
    pub(crate) fn new(automaton: &Automaton) -> Self {
        let mut edges: HashMap<State, Vec<State>> = HashMap::new();

        for transition in &automaton.transitions {
            if transition.symbol.is_epsilon() {
                edges
                    .entry(transition.origin)
                    .or_default()
                    .push(transition.destination);
            }
        }

        Self { edges }
    }

    /// Computes the epsilon closure of `state`.
    ///
    /// Walks the epsilon edges with an explicit stack; the closure set doubles
    /// as the visited set, so each state is expanded at most once and cycles
    /// (including self-loops) terminate.
    pub(crate) fn closure(&self, state: State) -> BTreeSet<State> {
        let mut closure = BTreeSet::from([state]);
        let mut stack = vec![state];

        while let Some(current) = stack.pop() {
            for &destination in self.edges.get(&current).into_iter().flatten() {
                if closure.insert(destination) {
                    stack.push(destination);
                }
            }
        }

        closure
    }
}

/// Returns the set of states reachable from `state` using zero or more
/// epsilon transitions, including `state` itself.
///
/// The result is a plain set: traversal order is not observable, and a state
/// with no outgoing epsilon transitions yields the singleton `{state}`.
pub fn epsilon_closure(automaton: &Automaton, state: State) -> BTreeSet<State> {
    EpsilonEdges::new(automaton).closure(state)
}
