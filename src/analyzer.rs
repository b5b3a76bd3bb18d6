//! This module validates automaton descriptions before the rest of the
//! library touches them. The epsilon-elimination construction assumes that
//! every transition endpoint is a declared state and every transition label a
//! declared symbol; descriptions that break those assumptions are rejected
//! here instead of silently producing an automaton with missing moves.

use crate::types::{Automaton, AutomatonError, State, Symbol};
use std::collections::BTreeSet;

/// Structural problems an automaton description can exhibit.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The state set is empty.
    NoStates,
    /// The initial state is not a member of the declared state set.
    UndeclaredInitialState(State),
    /// Final states that are not members of the declared state set.
    UndeclaredFinalStates(Vec<State>),
    /// Transition origins or destinations outside the declared state set.
    UndeclaredTransitionStates(Vec<State>),
    /// Transition labels outside the declared alphabet.
    UndeclaredTransitionSymbols(Vec<Symbol>),
}

impl From<AnalysisError> for AutomatonError {
    /// Converts an `AnalysisError` into an `AutomatonError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NoStates => {
                AutomatonError::ValidationError("automaton has no states".to_string())
            }
            AnalysisError::UndeclaredInitialState(state) => AutomatonError::ValidationError(
                format!("initial state {} is not declared", state),
            ),
            AnalysisError::UndeclaredFinalStates(states) => AutomatonError::ValidationError(
                format!("final states not declared: {:?}", states),
            ),
            AnalysisError::UndeclaredTransitionStates(states) => AutomatonError::ValidationError(
                format!("transitions reference undeclared states: {:?}", states),
            ),
            AnalysisError::UndeclaredTransitionSymbols(symbols) => {
                let symbols: Vec<String> = symbols.iter().map(Symbol::to_string).collect();
                AutomatonError::ValidationError(format!(
                    "transitions reference undeclared symbols: {:?}",
                    symbols
                ))
            }
        }
    }
}

/// Analyzes an `Automaton` for structural invariant violations.
///
/// Runs every check and reports the first failure. Called by
/// `Automaton::new`, so any automaton obtained through the constructor or the
/// loader already satisfies the invariants the algorithms rely on.
///
/// # Returns
///
/// * `Ok(())` if no violation is found.
/// * `Err(AutomatonError::ValidationError)` describing the first violation.
pub fn analyze(automaton: &Automaton) -> Result<(), AutomatonError> {
    let errors = [
        check_states,
        check_initial_state,
        check_final_states,
        check_transition_states,
        check_transition_symbols,
    ]
    .iter()
    .filter_map(|check| check(automaton).err())
    .collect::<Vec<_>>();

    if let Some(first_error) = errors.first() {
        return Err(first_error.clone().into());
    }

    Ok(())
}

/// Checks that the state set is non-empty.
fn check_states(automaton: &Automaton) -> Result<(), AnalysisError> {
    if automaton.states.is_empty() {
        return Err(AnalysisError::NoStates);
    }

    Ok(())
}

/// Checks that the initial state is declared.
fn check_initial_state(automaton: &Automaton) -> Result<(), AnalysisError> {
    if !automaton.states.contains(&automaton.initial) {
        return Err(AnalysisError::UndeclaredInitialState(automaton.initial));
    }

    Ok(())
}

/// Checks that the final states form a subset of the declared states.
fn check_final_states(automaton: &Automaton) -> Result<(), AnalysisError> {
    let undeclared: Vec<State> = automaton
        .finals
        .difference(&automaton.states)
        .copied()
        .collect();

    if !undeclared.is_empty() {
        return Err(AnalysisError::UndeclaredFinalStates(undeclared));
    }

    Ok(())
}

/// Checks that every transition origin and destination is a declared state.
fn check_transition_states(automaton: &Automaton) -> Result<(), AnalysisError> {
    let undeclared: BTreeSet<State> = automaton
        .transitions
        .iter()
        .flat_map(|t| [t.origin, t.destination])
        .filter(|state| !automaton.states.contains(state))
        .collect();

    if !undeclared.is_empty() {
        return Err(AnalysisError::UndeclaredTransitionStates(
            undeclared.into_iter().collect(),
        ));
    }

    Ok(())
}

/// Checks that every transition label is a declared alphabet symbol.
fn check_transition_symbols(automaton: &Automaton) -> Result<(), AnalysisError> {
    let undeclared: BTreeSet<Symbol> = automaton
        .transitions
        .iter()
        .map(|t| t.symbol.clone())
        .filter(|symbol| !automaton.alphabet.contains(symbol))
        .collect();

    if !undeclared.is_empty() {
        return Err(AnalysisError::UndeclaredTransitionSymbols(
            undeclared.into_iter().collect(),
        ));
    }

    Ok(())
}
