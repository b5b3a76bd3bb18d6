//! This module defines the `TuringMachine` struct, a single-tape step
//! simulator. It is independent from the automaton model in the rest of the
//! crate; the two share only the JSON-first configuration style and the CLI.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Blank padding appended after the input word when the tape is seeded.
pub const TAPE_SLACK: usize = 10;
/// The maximum number of steps to execute before giving up.
pub const MAX_EXECUTION_STEPS: usize = 10_000;

/// Errors produced while loading or running a machine description.
#[derive(Debug, Error)]
pub enum MachineError {
    /// A description could not be parsed as JSON.
    #[error("machine parsing error: {0}")]
    ParseError(#[from] serde_json::Error),
    /// A file could not be read or written.
    #[error("file error: {0}")]
    FileError(String),
}

/// Head movement of a rule, written `"L"` or `"R"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the left.
    #[serde(rename = "L")]
    Left,
    /// Move the head one cell to the right.
    #[serde(rename = "R")]
    Right,
}

/// A single transition rule: in `state`, reading `read`, write `write`, move
/// the head in `direction`, and enter `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub state: String,
    pub read: char,
    pub next_state: String,
    pub write: char,
    #[serde(rename = "move")]
    pub direction: Direction,
}

/// The JSON shape of a machine file: blank symbol, initial state, final
/// states, and the rule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineDescription {
    #[serde(default)]
    pub name: String,
    pub blank: char,
    pub initial_state: String,
    pub final_states: Vec<String>,
    pub transitions: Vec<Rule>,
}

impl MachineDescription {
    /// Loads a machine description from the specified file path.
    pub fn from_file(path: &Path) -> Result<Self, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses a machine description from JSON content.
    pub fn from_json(content: &str) -> Result<Self, MachineError> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and continues execution.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

/// Why the machine halted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The current state is a final state.
    Accept,
    /// No rule matches the current state and the symbol under the head.
    Stuck { state: String, read: char },
    /// The step limit was reached without halting.
    StepLimit,
}

/// The outcome of a full run, in the shape the result file uses: the input
/// and final tape, the derived state and tape-alphabet sets, and one rendered
/// configuration line per executed step.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    #[serde(rename = "maquina")]
    pub machine: String,
    #[serde(rename = "entrada")]
    pub input: String,
    #[serde(rename = "fita_final")]
    pub final_tape: String,
    pub states: Vec<String>,
    #[serde(rename = "estado_final")]
    pub final_state: String,
    pub tape_alphabet: Vec<char>,
    #[serde(rename = "numero_de_passos")]
    pub step_count: usize,
    #[serde(rename = "passos")]
    pub steps: Vec<String>,
}

/// A single-tape Turing machine.
///
/// The tape grows on demand at both ends; moving left at cell 0 inserts a
/// blank and leaves the head on it. Each executed step appends a rendered
/// configuration line to the trace, starting with the initial configuration.
pub struct TuringMachine {
    state: String,
    initial_state: String,
    tape: Vec<char>,
    head: usize,
    blank: char,
    finals: HashSet<String>,
    rules: HashMap<String, Vec<Rule>>,
    input: String,
    name: String,
    step_count: usize,
    trace: Vec<String>,
}

impl TuringMachine {
    /// Creates a machine from a description and an input word.
    ///
    /// The tape is seeded with the input followed by a margin of blanks.
    pub fn new(description: &MachineDescription, input: &str) -> Self {
        let mut tape: Vec<char> = input.chars().collect();
        tape.extend(std::iter::repeat(description.blank).take(TAPE_SLACK));

        let mut rules: HashMap<String, Vec<Rule>> = HashMap::new();
        for rule in &description.transitions {
            rules
                .entry(rule.state.clone())
                .or_default()
                .push(rule.clone());
        }

        let mut machine = Self {
            state: description.initial_state.clone(),
            initial_state: description.initial_state.clone(),
            tape,
            head: 0,
            blank: description.blank,
            finals: description.final_states.iter().cloned().collect(),
            rules,
            input: input.to_string(),
            name: description.name.clone(),
            step_count: 0,
            trace: Vec::new(),
        };

        machine.trace.push(machine.render_configuration());
        machine
    }

    /// Executes a single step.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` after applying a rule.
    /// * `Step::Halt(Halt::Accept)` when the current state is final; this is
    ///   checked before looking for a rule, so a final state never moves.
    /// * `Step::Halt(Halt::Stuck { .. })` when no rule matches.
    pub fn step(&mut self) -> Step {
        if self.finals.contains(&self.state) {
            return Step::Halt(Halt::Accept);
        }

        // Keep the head within the tape
        if self.head >= self.tape.len() {
            self.tape.resize(self.head + 1, self.blank);
        }

        let rule = match self.transition().cloned() {
            Some(rule) => rule,
            None => {
                return Step::Halt(Halt::Stuck {
                    state: self.state.clone(),
                    read: self.tape[self.head],
                });
            }
        };

        self.tape[self.head] = rule.write;

        match rule.direction {
            Direction::Right => {
                self.head += 1;
                if self.head >= self.tape.len() {
                    self.tape.push(self.blank);
                }
            }
            Direction::Left => {
                if self.head == 0 {
                    // Extend the tape to the left; the head stays on the new blank
                    self.tape.insert(0, self.blank);
                } else {
                    self.head -= 1;
                }
            }
        }

        self.state = rule.next_state.clone();
        self.step_count += 1;
        self.trace.push(self.render_configuration());

        Step::Continue
    }

    /// Runs the machine until it halts or reaches the step limit. A stuck
    /// halt leaves a note in the trace.
    pub fn run(&mut self) -> Halt {
        for _ in 0..MAX_EXECUTION_STEPS {
            match self.step() {
                Step::Continue => continue,
                Step::Halt(halt) => {
                    if let Halt::Stuck { state, read } = &halt {
                        self.trace.push(format!(
                            "No rule for state '{}' reading '{}'. Execution stopped.",
                            state, read
                        ));
                    }
                    return halt;
                }
            }
        }

        Halt::StepLimit
    }

    /// Finds the rule matching the current state and the symbol under the
    /// head, if any.
    pub fn transition(&self) -> Option<&Rule> {
        let read = self.tape.get(self.head).copied().unwrap_or(self.blank);

        self.rules
            .get(&self.state)
            .and_then(|rules| rules.iter().find(|rule| rule.read == read))
    }

    /// Renders the current configuration as a single line: the tape up to the
    /// last non-blank cell (or the head, whichever is further), with the head
    /// cell shown as `[state symbol]` and blank cells elsewhere left as gaps.
    pub fn render_configuration(&self) -> String {
        let mut last_used = self.tape.len();
        while last_used > 0 && self.tape[last_used - 1] == self.blank {
            last_used -= 1;
        }
        let limit = (last_used.max(1) - 1).max(self.head);

        let mut items = Vec::new();
        for (i, &symbol) in self.tape.iter().enumerate().take(limit + 1) {
            if i == self.head {
                items.push(format!("[{} {}]", self.state, symbol));
            } else if symbol == self.blank {
                items.push(String::new());
            } else {
                items.push(symbol.to_string());
            }
        }

        items.join(" ").trim().to_string()
    }

    /// Returns the tape contents with leading and trailing blanks removed.
    pub fn final_tape(&self) -> String {
        let tape: String = self.tape.iter().collect();
        tape.trim_matches(self.blank).to_string()
    }

    /// Builds the run report for the steps executed so far. The state and
    /// tape-alphabet sets are derived from the rules, since the description
    /// does not declare them separately.
    pub fn report(&self) -> RunReport {
        let mut states: BTreeSet<String> = BTreeSet::new();
        let mut alphabet: BTreeSet<char> = BTreeSet::new();

        for rule in self.rules.values().flatten() {
            states.insert(rule.state.clone());
            states.insert(rule.next_state.clone());
            alphabet.insert(rule.read);
            alphabet.insert(rule.write);
        }
        alphabet.insert(self.blank);

        RunReport {
            machine: self.name.clone(),
            input: self.input.clone(),
            final_tape: self.final_tape(),
            states: states.into_iter().collect(),
            final_state: self.state.clone(),
            tape_alphabet: alphabet.into_iter().collect(),
            step_count: self.step_count,
            steps: self.trace.clone(),
        }
    }

    /// Resets the machine to its initial configuration.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.tape = self.input.chars().collect();
        self.tape
            .extend(std::iter::repeat(self.blank).take(TAPE_SLACK));
        self.head = 0;
        self.step_count = 0;
        self.trace.clear();
        self.trace.push(self.render_configuration());
    }

    /// Returns the current state.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the tape contents.
    pub fn tape(&self) -> &[char] {
        &self.tape
    }

    /// Returns the current head position.
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the number of executed steps.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the rendered configuration lines recorded so far.
    pub fn trace(&self) -> &[String] {
        &self.trace
    }
}
