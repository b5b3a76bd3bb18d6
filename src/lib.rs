//! This crate provides the core logic for a finite-automata toolkit centred
//! on epsilon elimination: modeling NFA-ε automata, computing epsilon
//! closures, building the language-equivalent epsilon-free automaton, and
//! loading/writing automata collections as JSON. A single-tape Turing machine
//! step simulator lives alongside as a separate component.

pub mod analyzer;
pub mod closure;
pub mod eliminate;
pub mod loader;
pub mod machine;
pub mod samples;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the `epsilon_closure` function from the closure module.
pub use closure::epsilon_closure;
/// Re-exports the `eliminate_epsilon` function from the eliminate module.
pub use eliminate::eliminate_epsilon;
/// Re-exports the `AutomatonLoader` struct and the wire description from the loader module.
pub use loader::{AutomatonDescription, AutomatonLoader};
/// Re-exports the Turing machine simulator types from the machine module.
pub use machine::{MachineDescription, MachineError, TuringMachine};
/// Re-exports the `SampleManager` struct and `SAMPLES` registry from the samples module.
pub use samples::{SampleManager, SAMPLES};
/// Re-exports the automaton model types from the types module.
pub use types::{Automaton, AutomatonError, State, Symbol, Transition, EPSILON};
