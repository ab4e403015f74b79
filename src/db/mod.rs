pub mod init;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::config::Config;

/// Opens the pool and makes sure every table exists.
pub async fn connect(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    init::create_tables(&db_pool).await?;

    Ok(db_pool)
}

/// Serializes stored timestamps as RFC 3339.
pub mod rfc3339 {
    use serde::{ser::Error, Serializer};
    use time::{format_description::well_known::Rfc3339, OffsetDateTime};

    pub fn serialize<S: Serializer>(timestamp: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let text = timestamp.format(&Rfc3339).map_err(S::Error::custom)?;
        serializer.serialize_str(&text)
    }
}
