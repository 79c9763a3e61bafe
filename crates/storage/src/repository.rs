//! Repository Implementation

use crate::StorageError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// Table definition. Column checks mirror the API-level validation and are
/// only a second line of defense.
const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS temperatures (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        location TEXT NOT NULL CHECK(length(location) >= 2 AND length(location) <= 50),
        temperature REAL NOT NULL CHECK(temperature >= -100 AND temperature <= 100),
        timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const INSERT_READING: &str = "INSERT INTO temperatures (location, temperature) VALUES (?, ?)";

const DELETE_READING: &str = "DELETE FROM temperatures WHERE id = ?";

// `id DESC` breaks timestamp ties in favor of the later insert.
const SELECT_RANKED: &str = r#"
    WITH ranked AS (
        SELECT
            id,
            location,
            ROUND(temperature, 2) AS temperature,
            timestamp,
            ROW_NUMBER() OVER (
                PARTITION BY location
                ORDER BY timestamp DESC, id DESC
            ) AS row_num
        FROM temperatures
    )
    SELECT id, location, temperature, timestamp, row_num
    FROM ranked
    ORDER BY location, row_num
"#;

/// A reading as submitted for storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    pub location: String,
    pub temperature: f64,
}

/// A stored reading annotated with its recency rank inside its location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RankedReading {
    pub id: i64,
    pub location: String,
    /// Rounded to 2 decimal places
    pub temperature: f64,
    /// `YYYY-MM-DD HH:MM:SS` in UTC; absent only in tables created without
    /// the NOT NULL constraint
    #[serde(with = "timestamp_format")]
    pub timestamp: Option<NaiveDateTime>,
    /// 1 = most recent reading for this location
    pub row_num: i64,
}

/// Serde format for stored timestamps, matching SQLite's `CURRENT_TIMESTAMP`
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| NaiveDateTime::parse_from_str(&raw, FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

/// Handle to the readings table
///
/// Cheap to clone; every clone shares the same connection pool.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open (creating if missing) a database file and ensure the schema
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Opened SQLite database at {}", path.display());

        let repository = Self { pool };
        repository.ensure_schema().await?;
        Ok(repository)
    }

    /// Create a repository over a private in-memory database
    ///
    /// The pool is pinned to one connection that never expires, otherwise
    /// each connection would see its own empty database.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        debug!("Created in-memory repository");

        let repository = Self { pool };
        repository.ensure_schema().await?;
        Ok(repository)
    }

    /// Create the readings table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Append a reading, returning its assigned id
    pub async fn insert(&self, reading: &NewReading) -> Result<i64, StorageError> {
        let id = sqlx::query(INSERT_READING)
            .bind(&reading.location)
            .bind(reading.temperature)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        debug!("Inserted reading {} for {}", id, reading.location);
        Ok(id)
    }

    /// Delete the reading with the given id, returning the rows affected
    ///
    /// The id is bound as text; integer affinity on the column makes numeric
    /// strings match while anything else affects zero rows.
    pub async fn delete(&self, id: &str) -> Result<u64, StorageError> {
        let affected = sqlx::query(DELETE_READING)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        debug!("Delete of reading {} affected {} row(s)", id, affected);
        Ok(affected)
    }

    /// All readings, ordered by location then recency rank
    pub async fn list_ranked(&self) -> Result<Vec<RankedReading>, StorageError> {
        let rows = sqlx::query_as::<_, RankedReading>(SELECT_RANKED)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} ranked readings", rows.len());
        Ok(rows)
    }

    /// Total number of stored readings
    pub async fn count(&self) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM temperatures")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
