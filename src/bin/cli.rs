use std::io::{self, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use vaultdb::QueryEngine;

const HISTORY_FILE: &str = ".vaultdb_history";

#[derive(Parser)]
#[command(author, version, about = "vaultdb CLI - an embedded encrypted tabular store")]
struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive shell
    Shell,

    /// Execute a single statement and exit
    Query {
        /// Statement to execute
        query: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut engine = QueryEngine::new();

    match cli.command {
        Some(Commands::Query { query }) => {
            let mut stdout = io::stdout();
            if let Err(err) = engine.execute_line(&query, &mut stdout) {
                eprintln!("Error: {err}");
                std::process::exit(1);
            }
        }
        Some(Commands::Shell) | None => {
            run_shell(&mut engine)?;
        }
    }

    Ok(())
}

fn run_shell(engine: &mut QueryEngine) -> Result<()> {
    println!("Welcome to vaultdb. Type 'help' for usage or 'exit' to quit.");
    println!("Statements: CREATE TABLE, DROP TABLE, DROP COLUMN, INSERT, SELECT,");
    println!("            UPDATE, DELETE, FLUSH <file> <key>, LOAD <file> <key>");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    if let Err(err) = rl.load_history(HISTORY_FILE) {
        if !err.to_string().contains("No such file or directory") {
            println!("Error loading history: {err}");
        }
    }

    loop {
        match rl.readline("vaultdb> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                    println!("Goodbye!");
                    break;
                }

                let mut stdout = io::stdout();
                if let Err(err) = engine.execute_line(line, &mut stdout) {
                    println!("Error: {err}");
                }
                stdout.flush()?;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                println!("Error reading input: {err}");
                break;
            }
        }
    }

    if let Err(err) = rl.save_history(HISTORY_FILE) {
        println!("Error saving history: {err}");
    }
    Ok(())
}
