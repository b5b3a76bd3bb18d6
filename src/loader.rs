//! This module provides the `AutomatonLoader` struct, responsible for reading
//! and writing named collections of automata in their JSON representation.

use crate::types::{Automaton, AutomatonError, State, Symbol, Transition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The JSON shape of a single automaton.
///
/// Field names follow the persisted format (`estados`, `alfabeto`, `inicial`,
/// `finais`, `transicoes`); sets travel as unordered lists, and duplicate
/// entries collapse when the description is turned into an `Automaton`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomatonDescription {
    #[serde(rename = "estados")]
    pub states: Vec<State>,
    #[serde(rename = "alfabeto")]
    pub alphabet: Vec<Symbol>,
    #[serde(rename = "inicial")]
    pub initial: State,
    #[serde(rename = "finais")]
    pub finals: Vec<State>,
    #[serde(rename = "transicoes")]
    pub transitions: Vec<Transition>,
}

impl TryFrom<AutomatonDescription> for Automaton {
    type Error = AutomatonError;

    /// Collapses the description's lists into sets and validates the result.
    fn try_from(description: AutomatonDescription) -> Result<Self, Self::Error> {
        Automaton::new(
            description.states.into_iter().collect(),
            description.alphabet.into_iter().collect(),
            description.initial,
            description.finals.into_iter().collect(),
            description.transitions.into_iter().collect(),
        )
    }
}

impl From<&Automaton> for AutomatonDescription {
    fn from(automaton: &Automaton) -> Self {
        Self {
            states: automaton.states.iter().copied().collect(),
            alphabet: automaton.alphabet.iter().cloned().collect(),
            initial: automaton.initial,
            finals: automaton.finals.iter().copied().collect(),
            transitions: automaton.transitions.iter().cloned().collect(),
        }
    }
}

/// `AutomatonLoader` is a utility struct for reading and writing automata.
/// A file holds a named collection: a JSON object mapping each automaton's
/// name to its description.
pub struct AutomatonLoader;

impl AutomatonLoader {
    /// Loads a named collection of automata from the specified file path.
    ///
    /// Every description in the file is validated; a single malformed or
    /// invalid entry fails the whole load, so no automaton of a bad file is
    /// ever processed.
    ///
    /// # Returns
    ///
    /// * `Ok(BTreeMap<String, Automaton>)` with one validated automaton per name.
    /// * `Err(AutomatonError::FileError)` if the file cannot be read.
    /// * `Err(AutomatonError::ParseError)` if the content is not valid JSON.
    /// * `Err(AutomatonError::ValidationError)` if a description violates the
    ///   structural invariants.
    pub fn load_collection(path: &Path) -> Result<BTreeMap<String, Automaton>, AutomatonError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutomatonError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_from_string(&content)
    }

    /// Loads a named collection of automata from the provided JSON content.
    pub fn load_from_string(content: &str) -> Result<BTreeMap<String, Automaton>, AutomatonError> {
        let descriptions: BTreeMap<String, AutomatonDescription> =
            serde_json::from_str(content)?;

        descriptions
            .into_iter()
            .map(|(name, description)| Ok((name, Automaton::try_from(description)?)))
            .collect()
    }

    /// Writes a named collection of automata to the specified file path,
    /// pretty-printed, with sets rendered as lists.
    pub fn write_collection(
        path: &Path,
        automata: &BTreeMap<String, Automaton>,
    ) -> Result<(), AutomatonError> {
        let content = Self::to_json(automata)?;

        fs::write(path, content).map_err(|e| {
            AutomatonError::FileError(format!("Failed to write file {}: {}", path.display(), e))
        })
    }

    /// Serializes a named collection of automata to a JSON string.
    pub fn to_json(automata: &BTreeMap<String, Automaton>) -> Result<String, AutomatonError> {
        let descriptions: BTreeMap<&String, AutomatonDescription> = automata
            .iter()
            .map(|(name, automaton)| (name, AutomatonDescription::from(automaton)))
            .collect();

        Ok(serde_json::to_string_pretty(&descriptions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const COLLECTION: &str = r#"
    {
        "exemplo": {
            "estados": [1, 2, 3],
            "alfabeto": ["a", "b", "ε"],
            "inicial": 1,
            "finais": [2],
            "transicoes": [
                [1, "a", 2],
                [1, "ε", 3],
                [2, "a", 3],
                [3, "b", 2]
            ]
        }
    }
    "#;

    #[test]
    fn test_load_valid_collection() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("automata.json");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(COLLECTION.as_bytes()).unwrap();

        let automata = AutomatonLoader::load_collection(&file_path).unwrap();
        assert_eq!(automata.len(), 1);

        let automaton = &automata["exemplo"];
        assert_eq!(automaton.states.len(), 3);
        assert_eq!(automaton.initial, 1);
        assert!(automaton.alphabet.contains(&Symbol::Epsilon));
        assert!(automaton
            .transitions
            .contains(&Transition::new(1, Symbol::Epsilon, 3)));
    }

    #[test]
    fn test_load_collapses_duplicates() {
        let content = r#"
        {
            "dup": {
                "estados": [1, 1, 2],
                "alfabeto": ["a", "a"],
                "inicial": 1,
                "finais": [2, 2],
                "transicoes": [[1, "a", 2], [1, "a", 2]]
            }
        }
        "#;

        let automata = AutomatonLoader::load_from_string(content).unwrap();
        let automaton = &automata["dup"];

        assert_eq!(automaton.states.len(), 2);
        assert_eq!(automaton.alphabet.len(), 1);
        assert_eq!(automaton.finals.len(), 1);
        assert_eq!(automaton.transitions.len(), 1);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let result = AutomatonLoader::load_from_string("this is not a collection");

        assert!(matches!(result, Err(AutomatonError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_invariant_violations() {
        // Transition destination 9 is not a declared state.
        let content = r#"
        {
            "quebrado": {
                "estados": [1],
                "alfabeto": ["a"],
                "inicial": 1,
                "finais": [],
                "transicoes": [[1, "a", 9]]
            }
        }
        "#;

        let result = AutomatonLoader::load_from_string(content);
        assert!(matches!(result, Err(AutomatonError::ValidationError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = AutomatonLoader::load_collection(&dir.path().join("missing.json"));

        assert!(matches!(result, Err(AutomatonError::FileError(_))));
    }

    #[test]
    fn test_write_and_reload_round_trip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("out.json");

        let automata = AutomatonLoader::load_from_string(COLLECTION).unwrap();
        AutomatonLoader::write_collection(&file_path, &automata).unwrap();

        let reloaded = AutomatonLoader::load_collection(&file_path).unwrap();
        assert_eq!(reloaded, automata);

        // The persisted field names survive the round trip.
        let written = fs::read_to_string(&file_path).unwrap();
        for field in ["estados", "alfabeto", "inicial", "finais", "transicoes"] {
            assert!(written.contains(field));
        }
    }
}
