use crate::{Commands, Result};

use rc_config::Config;
use rc_core::{User, UserService};
use rc_db::{PoolSettings, SqliteUserRepository, open_pool};
use rc_idgen::{Sonyflake, SonyflakeSettings};

use std::sync::Arc;

use log::info;

/// Wire the SQLite repository and the Sonyflake generator described by
/// `config` into a user service.
pub async fn build_service(config: &Config) -> Result<UserService> {
    let settings = PoolSettings {
        path: config.database_path()?,
        max_connections: config.database.max_connections,
        busy_timeout: config.busy_timeout(),
    };
    info!("Opening database: {}", settings.path.display());
    let pool = open_pool(&settings).await?;

    let generator = Sonyflake::new(SonyflakeSettings {
        start_time: config.id_generator.start_time,
        machine_id: config.id_generator.machine_id,
    })?;
    info!("Id generator ready: machine_id={}", generator.machine_id());

    Ok(UserService::new(
        Arc::new(SqliteUserRepository::new(pool)),
        Arc::new(generator),
    ))
}

pub async fn execute(service: &UserService, command: Commands) -> Result<User> {
    let user = match command {
        Commands::CreateUser { name } => service.create_user(&name).await?,
        Commands::GetUser { id } => service.get_user(id).await?,
        Commands::GoogleUser { email, name } => {
            service.get_or_create_google_user(&email, &name).await?
        }
    };

    Ok(user)
}

pub fn render(user: &User, pretty: bool) -> Result<String> {
    let output = if pretty {
        serde_json::to_string_pretty(user)?
    } else {
        serde_json::to_string(user)?
    };

    Ok(output)
}
