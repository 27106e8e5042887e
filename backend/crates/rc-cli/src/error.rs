use std::process::ExitCode;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] rc_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] rc_db::DbError),

    #[error("Id generator error: {0}")]
    IdGen(#[from] rc_idgen::IdGenError),

    #[error("{0}")]
    Service(#[from] rc_core::UserServiceError),

    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

impl CliError {
    /// 2 when the requested user does not exist, 1 for every other failure.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Service(e) if e.is_not_found() => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
