use crate::{ConfigError, ConfigErrorResult, DEFAULT_ID_START_TIME_SECS, DEFAULT_MACHINE_ID};

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Settings for the Sonyflake id generator.
///
/// Every process writing to the same user store needs its own `machine_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdGeneratorConfig {
    pub machine_id: u16,
    pub start_time: DateTime<Utc>,
}

impl Default for IdGeneratorConfig {
    fn default() -> Self {
        Self {
            machine_id: DEFAULT_MACHINE_ID,
            start_time: DateTime::from_timestamp(DEFAULT_ID_START_TIME_SECS, 0)
                .unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

impl IdGeneratorConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.start_time > Utc::now() {
            return Err(ConfigError::id_generator(format!(
                "id_generator.start_time must not be in the future, got {}",
                self.start_time
            )));
        }

        Ok(())
    }
}
