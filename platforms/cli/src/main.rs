use afn::eliminate_epsilon;
use afn::loader::AutomatonLoader;
use afn::machine::{MachineDescription, TuringMachine};
use afn::samples::SampleManager;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Remove epsilon transitions from every automaton in a collection
    Eliminate {
        /// The JSON collection of automata (falls back to the embedded samples)
        #[clap(short, long)]
        input: Option<PathBuf>,

        /// Write the transformed collection to this file
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Skip the before/after rendering of each automaton
        #[clap(short, long)]
        quiet: bool,
    },
    /// Run a Turing machine on an input word
    Run {
        /// The JSON machine description file
        #[clap(short, long)]
        machine: PathBuf,

        /// The input word written on the tape
        #[clap(short, long, default_value = "")]
        input: String,

        /// Write the run report to this file as JSON
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Eliminate {
            input,
            output,
            quiet,
        } => eliminate(input, output, quiet),
        Command::Run {
            machine,
            input,
            output,
        } => run(&machine, &input, output),
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn eliminate(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn Error>> {
    let automata = match &input {
        Some(path) => AutomatonLoader::load_collection(path)?,
        None => SampleManager::all()?,
    };

    let mut transformed = BTreeMap::new();
    for (name, automaton) in &automata {
        let result = eliminate_epsilon(automaton);

        if !quiet {
            println!("=== Automaton '{}' before elimination ===", name);
            println!("{}\n", automaton);
            println!("=== Automaton '{}' after elimination ===", name);
            println!("{}\n", result);
        }

        transformed.insert(name.clone(), result);
    }

    if let Some(path) = output {
        AutomatonLoader::write_collection(&path, &transformed)?;
        println!("Wrote {} automata to {}", transformed.len(), path.display());
    }

    Ok(())
}

fn run(machine: &PathBuf, input: &str, output: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let description = MachineDescription::from_file(machine)?;
    let mut machine = TuringMachine::new(&description, input);

    machine.run();

    for line in machine.trace() {
        println!("{}", line);
    }

    let report = machine.report();
    println!("\nFinal state: {}", report.final_state);
    println!("Final tape: {}", report.final_tape);
    println!("Steps: {}", report.step_count);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(&path, json)
            .map_err(|e| format!("Failed to write file {}: {}", path.display(), e))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
