//! Immich Assistant Catalog
//!
//! Read-only access to Immich's Postgres database.
//!
//! Every consumed table is mapped onto an `assistant-core` type through the
//! [`CatalogEntity`] trait and listed in full with [`select_all`]. Nothing in
//! this crate writes to the catalog.
//!
//! # Example
//!
//! ```rust,no_run
//! use assistant_catalog::{connect, select_all, ConnectionSettings};
//! use assistant_core::Asset;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ConnectionSettings {
//!     host: "localhost".to_string(),
//!     port: 5432,
//!     username: "postgres".to_string(),
//!     password: "postgres".to_string(),
//!     database: "immich".to_string(),
//! };
//! let pool = connect(&settings).await?;
//! let assets: Vec<Asset> = select_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod entity;
mod error;

pub use entity::CatalogEntity;
pub use error::{CatalogError, Result};

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::fmt;
use std::time::Duration;

/// Connection parameters, mirroring Immich's own `DB_*` settings
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Open a small read-only pool against the catalog
///
/// The pool is shared by every listing task of a run.
pub async fn connect(settings: &ConnectionSettings) -> Result<PgPool> {
    tracing::debug!(
        host = %settings.host,
        port = settings.port,
        database = %settings.database,
        "Connecting to catalog"
    );

    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.username)
        .password(&settings.password)
        .database(&settings.database)
        .application_name("immich-assistant");

    let pool = PgPoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
        .map_err(CatalogError::Connection)?;

    tracing::info!("Catalog connection established");
    Ok(pool)
}

/// List every row of an entity's table
pub async fn select_all<T: CatalogEntity>(pool: &PgPool) -> Result<Vec<T>> {
    let query = format!("SELECT * FROM \"{}\"", T::TABLE_NAME);
    let rows = sqlx::query(&query).fetch_all(pool).await?;

    let entities = rows
        .iter()
        .map(T::from_row)
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(table = T::TABLE_NAME, rows = entities.len(), "Listed catalog table");
    Ok(entities)
}
