//! Command line interface.

use clap::Parser;

/// Perfect-play tic-tac-toe server.
#[derive(Debug, Parser)]
#[command(name = "oxo_server", version, about)]
pub struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// SQLite database path. When absent, `DATABASE_URL` is consulted,
    /// then `oxo.db`.
    #[arg(long)]
    pub database_path: Option<String>,
}
