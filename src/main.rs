//! bujo CLI - a command-line bullet journal.

use bujo::cli::{Cli, Commands, ListCommands};
use bujo::storage::Store;
use bujo::{action_log, commands, config};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose || config::verbose_default();

    let root = resolve_root(cli.root);
    let command_name = command_name(&cli.command);

    let start = Instant::now();
    let result = run_command(cli.command, &root, verbose);
    let duration = start.elapsed().as_millis() as u64;

    let error = result.as_ref().err().map(|e| e.to_string());
    action_log::log_action(&root, &command_name, error.is_none(), error, duration);

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Journal directory: --root / BUJO_ROOT if given, else the platform
/// data directory.
fn resolve_root(explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => path,
        None => config::journal_root().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
    }
}

/// Stable command name for the action log.
fn command_name(command: &Commands) -> String {
    match command {
        Commands::Add { .. } => "add".to_string(),
        Commands::List { command, .. } => match command {
            Some(ListCommands::All { .. }) => "list all".to_string(),
            Some(ListCommands::Upcoming { .. }) => "list upcoming".to_string(),
            Some(ListCommands::Complete) => "list complete".to_string(),
            Some(ListCommands::Pri) | None => "list pri".to_string(),
        },
        Commands::Mark { .. } => "mark".to_string(),
        Commands::Complete => "complete".to_string(),
        Commands::Query { .. } => "query".to_string(),
        Commands::Delete { .. } => "delete".to_string(),
        Commands::Export { .. } => "export".to_string(),
        Commands::Import { .. } => "import".to_string(),
        Commands::Info => "info".to_string(),
        Commands::Log { .. } => "log".to_string(),
    }
}

fn run_command(command: Commands, root: &Path, verbose: bool) -> bujo::Result<String> {
    match command {
        Commands::Info => Ok(commands::info()),
        Commands::Log { num_entries } => commands::log(root, num_entries),
        Commands::Add {
            description,
            status,
            signifier,
            parent,
            time,
        } => {
            let mut store = Store::open(root)?;
            commands::add(
                &mut store,
                &description,
                &status,
                &signifier,
                parent,
                time.as_deref(),
                verbose,
            )
        }
        Commands::List { num_items, command } => {
            let store = Store::open(root)?;
            match command.unwrap_or(ListCommands::Pri) {
                ListCommands::All { state } => {
                    commands::list_all(&store, &state, num_items, verbose)
                }
                ListCommands::Upcoming { state } => {
                    commands::list_upcoming(&store, &state, num_items, verbose)
                }
                ListCommands::Pri => commands::list_pri(&store, num_items, verbose),
                ListCommands::Complete => commands::list_complete(&store, num_items, verbose),
            }
        }
        Commands::Mark { token, id } => {
            let mut store = Store::open(root)?;
            commands::mark(&mut store, &token, id, verbose)
        }
        Commands::Complete => {
            let mut store = Store::open(root)?;
            commands::complete_past(&mut store)
        }
        Commands::Query {
            substring,
            show_complete,
        } => {
            let store = Store::open(root)?;
            commands::query(&store, &substring, show_complete, verbose)
        }
        Commands::Delete { id } => {
            let mut store = Store::open(root)?;
            commands::delete(&mut store, id, verbose)
        }
        Commands::Export { file } => {
            let store = Store::open(root)?;
            commands::export(&store, &file)
        }
        Commands::Import { file } => {
            let mut store = Store::open(root)?;
            commands::import(&mut store, &file)
        }
    }
}
