//! CLI argument definitions for bujo.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bujo - a command-line bullet journal.
#[derive(Parser, Debug)]
#[command(name = "bj")]
#[command(author, version, about = "A command-line bullet journal", long_about = None)]
pub struct Cli {
    /// Append full value strings after symbols (also: BUJO_VERBOSE)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Journal data directory (default: platform data dir)
    #[arg(long, global = true, env = "BUJO_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new item
    Add {
        /// The description of the item
        description: String,

        /// The state of the item (symbol or full value, e.g. '.' or
        /// 'incomplete')
        #[arg(short, long)]
        status: String,

        /// The signifier of the item ('*', '!', full value, or 'none')
        #[arg(long, default_value = "none")]
        signifier: String,

        /// Parent item id
        #[arg(short, long)]
        parent: Option<i64>,

        /// Scheduled time (e.g. '2023-06-09 14:05' or 'tomorrow')
        #[arg(short, long)]
        time: Option<String>,
    },

    /// List items (defaults to priority items)
    List {
        /// Maximum number of items to show
        #[arg(short, long, env = "BUJO_NUM_ITEMS", default_value_t = 10)]
        num_items: usize,

        #[command(subcommand)]
        command: Option<ListCommands>,
    },

    /// Update an item's state or signifier
    Mark {
        /// State or signifier token; 'none' clears the signifier
        token: String,

        /// Item id
        id: i64,
    },

    /// Mark past items as complete
    Complete,

    /// Run a text query on all items
    Query {
        /// Substring to search descriptions for
        substring: String,

        /// If set, show completed items
        #[arg(short, long)]
        show_complete: bool,
    },

    /// Delete an item and its children forever
    Delete {
        /// Item id
        id: i64,
    },

    /// Export items to JSON
    Export {
        /// Output path ('-' for stdout)
        #[arg(default_value = "-")]
        file: String,
    },

    /// Import items from JSON
    Import {
        /// Input path ('-' for stdin)
        #[arg(default_value = "-")]
        file: String,
    },

    /// Show annotation legend and configuration
    Info,

    /// Show recent command history
    Log {
        /// Maximum number of entries to show
        #[arg(short, long, default_value_t = 20)]
        num_entries: usize,
    },
}

/// List subcommands
#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Show all items, ordered by id
    All {
        /// Optional state or signifier filter
        #[arg(default_value = "none")]
        state: String,
    },

    /// Show upcoming items
    Upcoming {
        /// Optional state or signifier filter
        #[arg(default_value = "event")]
        state: String,
    },

    /// Show priority items
    Pri,

    /// Show completed items
    Complete,
}
