use clap::{Parser, Subcommand};
use std::net::SocketAddr;

/// Recipe catalog server.
#[derive(Debug, Parser)]
#[command(name = "pantry", version, about)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "pantry.db", global = true)]
    pub database_url: String,

    /// Address the HTTP server listens on
    #[arg(long, env = "PANTRY_BIND", default_value = "0.0.0.0:3000", global = true)]
    pub bind: SocketAddr,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Replace every recipe and ingredient with the demo catalog
    Seed,
    /// Print the OpenAPI document and exit
    Openapi,
}

impl Cli {
    pub fn subcommand(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
