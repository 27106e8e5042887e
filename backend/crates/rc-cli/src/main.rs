//! rc-users - random chat user administration
//!
//! Runs the user service against the configured SQLite store.
//!
//! # Examples
//!
//! ```bash
//! rc-users create-user alice
//! rc-users get-user 6051953537613824001 --pretty
//! rc-users google-user alice@example.com alice
//! ```

use rc_cli::{Cli, CliError, app, logger};

use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = rc_config::Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;
    config.log_summary();

    let service = app::build_service(&config).await?;
    let user = app::execute(&service, cli.command).await?;

    app::render(&user, cli.pretty)
}
