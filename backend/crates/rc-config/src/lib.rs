mod config;
mod database_config;
mod error;
mod id_generator_config;
mod log_level;
mod logging_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use id_generator_config::IdGeneratorConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;

const DEFAULT_CONFIG_DIR: &str = ".rc";
const CONFIG_DIR_ENV: &str = "RC_CONFIG_DIR";
const DEFAULT_DATABASE_FILENAME: &str = "users.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const MIN_MAX_CONNECTIONS: u32 = 1;
const MAX_MAX_CONNECTIONS: u32 = 100;
const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 5;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_MACHINE_ID: u16 = 1;
/// 2024-01-01T00:00:00Z
const DEFAULT_ID_START_TIME_SECS: i64 = 1_704_067_200;
