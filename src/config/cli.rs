use clap::Subcommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum Command {
    /// Show the roster, optionally filtered by name
    List {
        /// Case-insensitive text contained in the name
        #[arg(short, long)]
        filter: Option<String>,

        /// Print as JSON instead of one line per person
        #[arg(long)]
        json: bool,
    },

    /// Add a new person
    Add {
        name: String,
        surname: String,
        /// Age as entered; validated before anything is stored
        age: String,
    },

    /// Edit the person at INDEX (as shown by `list`)
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        surname: Option<String>,
        #[arg(long)]
        age: Option<String>,
    },

    /// Delete the person at INDEX
    Remove { index: usize },

    /// Merge the rows of a CSV file into the roster
    Import { file: String },

    /// Write the roster to a CSV file
    Export { file: String },
}

impl Command {
    /// Whether the command changes the roster and it must be saved afterwards.
    pub fn mutates(&self) -> bool {
        !matches!(self, Command::List { .. } | Command::Export { .. })
    }
}
