use crate::commands::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "rc-users")]
#[command(about = "Random chat user administration")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}
