/// Immich connection and storage configuration
use crate::error::{CliError, Result};
use assistant_catalog::ConnectionSettings;
use assistant_core::paths::DEFAULT_MEDIA_LOCATION;
use assistant_core::StorageLayout;
use clap::Args;
use std::path::{Path, PathBuf};

/// Settings shared with the Immich server
///
/// Each one can be given as a flag or through the same environment variable
/// Immich itself reads.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[command(next_help_heading = "Immich configuration")]
pub struct ImmichConfig {
    /// Hostname of Immich's Postgres database
    #[arg(long, env = "DB_HOSTNAME")]
    pub db_hostname: String,

    /// Port of Immich's Postgres database
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// User to connect to the database as
    #[arg(long, env = "DB_USERNAME")]
    pub db_username: String,

    /// Password of the database user
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    /// Name of Immich's database
    #[arg(long, env = "DB_DATABASE_NAME")]
    pub db_database_name: String,

    /// Local directory Immich's UPLOAD_LOCATION points to
    #[arg(long, env = "UPLOAD_LOCATION")]
    pub upload_location: PathBuf,

    /// The same directory as seen from inside the Immich server
    #[arg(long, env = "IMMICH_MEDIA_LOCATION", default_value = DEFAULT_MEDIA_LOCATION)]
    pub media_location: PathBuf,
}

impl ImmichConfig {
    pub fn validate(&self) -> Result<()> {
        validate_readable_dir(&self.upload_location, "Upload location")
    }

    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            host: self.db_hostname.clone(),
            port: self.db_port,
            username: self.db_username.clone(),
            password: self.db_password.clone(),
            database: self.db_database_name.clone(),
        }
    }

    pub fn storage_layout(&self) -> StorageLayout {
        StorageLayout::new(&self.upload_location, &self.media_location)
    }
}

/// Fail unless `path` is an existing, listable directory
pub fn validate_readable_dir(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        return Err(CliError::config(format!(
            "{what} {} does not exist",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(CliError::config(format!(
            "{what} {} is not a directory",
            path.display()
        )));
    }
    std::fs::read_dir(path).map_err(|e| {
        CliError::config(format!("{what} {} is not readable: {e}", path.display()))
    })?;
    Ok(())
}
