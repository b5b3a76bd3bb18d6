//! A small registry of built-in automata, embedded at compile time. The CLI
//! falls back to these when no input file is given, and tests use them as
//! fixtures.

use crate::loader::AutomatonLoader;
use crate::types::{Automaton, AutomatonError};

use std::collections::BTreeMap;
use std::sync::RwLock;

// Default embedded collection
const SAMPLE_COLLECTION: &str = include_str!("../samples/automata.json");

lazy_static::lazy_static! {
    pub static ref SAMPLES: RwLock<BTreeMap<String, Automaton>> = RwLock::new(BTreeMap::new());
}

pub struct SampleManager;

impl SampleManager {
    /// Initialize the registry with the embedded collection
    pub fn load() -> Result<(), AutomatonError> {
        let automata = AutomatonLoader::load_from_string(SAMPLE_COLLECTION)?;

        if let Ok(mut write_guard) = SAMPLES.write() {
            *write_guard = automata;
        } else {
            return Err(AutomatonError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available sample automata
    pub fn count() -> usize {
        // Initialize with the embedded collection if not already initialized
        let _ = Self::load();

        SAMPLES.read().map(|samples| samples.len()).unwrap_or(0)
    }

    /// Get a sample automaton by its name
    pub fn get(name: &str) -> Result<Automaton, AutomatonError> {
        // Initialize with the embedded collection if not already initialized
        let _ = Self::load();

        SAMPLES
            .read()
            .map_err(|_| AutomatonError::FileError("Failed to acquire read lock".to_string()))?
            .get(name)
            .cloned()
            .ok_or_else(|| {
                AutomatonError::ValidationError(format!("Sample '{}' not found", name))
            })
    }

    /// List all sample names
    pub fn names() -> Vec<String> {
        // Initialize with the embedded collection if not already initialized
        let _ = Self::load();

        SAMPLES
            .read()
            .map(|samples| samples.keys().cloned().collect())
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the whole embedded collection
    pub fn all() -> Result<BTreeMap<String, Automaton>, AutomatonError> {
        let _ = Self::load();

        SAMPLES
            .read()
            .map(|samples| samples.clone())
            .map_err(|_| AutomatonError::FileError("Failed to acquire read lock".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eliminate::eliminate_epsilon;

    #[test]
    fn test_sample_manager_initialization() {
        let result = SampleManager::load();
        assert!(result.is_ok());
        assert_eq!(SampleManager::count(), 3);
    }

    #[test]
    fn test_get_sample_by_name() {
        let automaton = SampleManager::get("fold-before-move").unwrap();

        assert_eq!(automaton.initial, 1);
        assert_eq!(automaton.states.len(), 3);
        assert!(automaton.has_epsilon_transitions());
    }

    #[test]
    fn test_unknown_sample_name() {
        let result = SampleManager::get("no-such-automaton");
        assert!(result.is_err());
    }

    #[test]
    fn test_sample_names_are_sorted() {
        let names = SampleManager::names();
        let mut sorted = names.clone();
        sorted.sort();

        assert_eq!(names, sorted);
        assert!(names.contains(&"promote-finals".to_string()));
    }

    #[test]
    fn test_every_sample_eliminates_cleanly() {
        for (name, automaton) in SampleManager::all().unwrap() {
            let output = eliminate_epsilon(&automaton);
            assert!(
                !output.has_epsilon_transitions(),
                "sample '{}' kept an epsilon transition",
                name
            );
            assert_eq!(output.states, automaton.states);
            assert_eq!(output.initial, automaton.initial);
        }
    }
}
