//! This module defines the core data structures used throughout the automata
//! toolkit: states, symbols, the transition relation, the automaton aggregate,
//! and the library error type.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// A state identifier. States are plain integers, unique within an automaton.
pub type State = u32;

/// The reserved alphabet symbol denoting the empty-string transition.
pub const EPSILON: &str = "ε";

/// An alphabet symbol.
///
/// The epsilon marker is a dedicated variant rather than a magic string, so
/// code that treats it specially can match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Symbol {
    /// The empty-string transition label, written `"ε"` on the wire.
    Epsilon,
    /// An ordinary input symbol.
    Input(String),
}

impl Symbol {
    /// Builds an ordinary input symbol from a string slice.
    pub fn input(symbol: &str) -> Self {
        Symbol::Input(symbol.to_string())
    }

    /// Returns `true` if this symbol is the epsilon marker.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl From<String> for Symbol {
    fn from(symbol: String) -> Self {
        if symbol == EPSILON {
            Symbol::Epsilon
        } else {
            Symbol::Input(symbol)
        }
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        match symbol {
            Symbol::Epsilon => EPSILON.to_string(),
            Symbol::Input(symbol) => symbol,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str(EPSILON),
            Symbol::Input(symbol) => f.write_str(symbol),
        }
    }
}

/// A single move of the automaton: reading `symbol` in `origin` may enter
/// `destination`.
///
/// The transition relation is a *set* of these triples, so a given
/// (origin, symbol) pair can map to zero, one, or many destinations.
/// On the wire a transition is the 3-element array `[origin, "symbol",
/// destination]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(State, Symbol, State)", into = "(State, Symbol, State)")]
pub struct Transition {
    /// The state this move starts from.
    pub origin: State,
    /// The symbol consumed by this move.
    pub symbol: Symbol,
    /// The state this move ends in.
    pub destination: State,
}

impl Transition {
    /// Creates a transition triple.
    pub fn new(origin: State, symbol: Symbol, destination: State) -> Self {
        Self {
            origin,
            symbol,
            destination,
        }
    }
}

impl From<(State, Symbol, State)> for Transition {
    fn from((origin, symbol, destination): (State, Symbol, State)) -> Self {
        Self {
            origin,
            symbol,
            destination,
        }
    }
}

impl From<Transition> for (State, Symbol, State) {
    fn from(transition: Transition) -> Self {
        (transition.origin, transition.symbol, transition.destination)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "δ({}, '{}') → {}",
            self.origin, self.symbol, self.destination
        )
    }
}

/// A nondeterministic finite automaton, possibly containing epsilon
/// transitions.
///
/// An `Automaton` is built once and never mutated afterwards; transformations
/// such as epsilon elimination borrow the input and allocate a fresh value.
/// `BTreeSet` keeps the set semantics of the model (duplicates collapse) and
/// gives a deterministic iteration order for rendering and serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    /// The non-empty set of states.
    pub states: BTreeSet<State>,
    /// The input alphabet, including the epsilon marker for an NFA-ε.
    pub alphabet: BTreeSet<Symbol>,
    /// The initial state, a member of `states`.
    pub initial: State,
    /// The accepting states, a subset of `states`.
    pub finals: BTreeSet<State>,
    /// The transition relation.
    pub transitions: BTreeSet<Transition>,
}

impl Automaton {
    /// Creates an automaton after checking its structural invariants.
    ///
    /// Descriptions whose transitions reference undeclared states or symbols,
    /// whose initial or final states fall outside the state set, or whose
    /// state set is empty are rejected with a validation error instead of
    /// silently producing a skewed result later.
    pub fn new(
        states: BTreeSet<State>,
        alphabet: BTreeSet<Symbol>,
        initial: State,
        finals: BTreeSet<State>,
        transitions: BTreeSet<Transition>,
    ) -> Result<Self, AutomatonError> {
        let automaton = Self {
            states,
            alphabet,
            initial,
            finals,
            transitions,
        };

        crate::analyzer::analyze(&automaton)?;

        Ok(automaton)
    }

    /// Returns `true` if any transition is labeled with the epsilon symbol.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.iter().any(|t| t.symbol.is_epsilon())
    }
}

impl fmt::Display for Automaton {
    /// Renders the automaton in the diagnostic layout used by the CLI:
    /// the four component sets followed by one `δ(origin, 'symbol') →
    /// destination` line per transition, in sorted order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States: {{{}}}", join(self.states.iter()))?;
        writeln!(f, "Alphabet: {{{}}}", join(self.alphabet.iter()))?;
        writeln!(f, "Initial: {}", self.initial)?;
        writeln!(f, "Finals: {{{}}}", join(self.finals.iter()))?;
        write!(f, "Transitions:")?;
        for transition in &self.transitions {
            write!(f, "\n\t{}", transition)?;
        }
        Ok(())
    }
}

fn join<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors produced while loading, validating, or writing automata.
#[derive(Debug, Error)]
pub enum AutomatonError {
    /// An automaton description violates a structural invariant.
    #[error("validation error: {0}")]
    ValidationError(String),
    /// A description could not be parsed as JSON.
    #[error("description parsing error: {0}")]
    ParseError(#[from] serde_json::Error),
    /// A file could not be read or written.
    #[error("file error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_wire_mapping() {
        let epsilon: Symbol = serde_json::from_str("\"ε\"").unwrap();
        let input: Symbol = serde_json::from_str("\"a\"").unwrap();

        assert_eq!(epsilon, Symbol::Epsilon);
        assert_eq!(input, Symbol::input("a"));

        assert_eq!(serde_json::to_string(&Symbol::Epsilon).unwrap(), "\"ε\"");
        assert_eq!(
            serde_json::to_string(&Symbol::input("b")).unwrap(),
            "\"b\""
        );
    }

    #[test]
    fn test_transition_wire_shape() {
        let transition = Transition::new(1, Symbol::input("a"), 2);

        let json = serde_json::to_string(&transition).unwrap();
        assert_eq!(json, "[1,\"a\",2]");

        let decoded: Transition = serde_json::from_str("[3,\"ε\",4]").unwrap();
        assert_eq!(decoded, Transition::new(3, Symbol::Epsilon, 4));
    }

    #[test]
    fn test_duplicate_transitions_collapse() {
        let transitions: BTreeSet<Transition> = [
            Transition::new(1, Symbol::input("a"), 2),
            Transition::new(1, Symbol::input("a"), 2),
            Transition::new(1, Symbol::input("a"), 3),
        ]
        .into_iter()
        .collect();

        assert_eq!(transitions.len(), 2);
    }

    #[test]
    fn test_automaton_display() {
        let automaton = Automaton::new(
            [1, 2].into_iter().collect(),
            [Symbol::input("a")].into_iter().collect(),
            1,
            [2].into_iter().collect(),
            [Transition::new(1, Symbol::input("a"), 2)]
                .into_iter()
                .collect(),
        )
        .unwrap();

        let rendered = automaton.to_string();
        assert!(rendered.contains("States: {1, 2}"));
        assert!(rendered.contains("Initial: 1"));
        assert!(rendered.contains("δ(1, 'a') → 2"));
    }

    #[test]
    fn test_error_display() {
        let error = AutomatonError::ValidationError("initial state 9 is not declared".to_string());

        let message = format!("{}", error);
        assert!(message.contains("validation error"));
        assert!(message.contains("9"));
    }
}
