use clap::{Parser, Subcommand};

use crate::board::DEFAULT_PAGE_SIZE;

/// Job application tracker: REST API server and board tools
#[derive(Debug, Parser)]
#[command(name = "job-tracker", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Keep jobs in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply database migrations and exit
    Migrate,
    /// Print the board of a running server
    Board {
        /// API root, overrides API_URL
        #[arg(long)]
        api_url: Option<String>,
        /// Cards per column page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Serve { in_memory: false })
    }
}
