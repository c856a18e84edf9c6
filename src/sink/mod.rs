use std::path::Path;

use log::debug;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::ClimateError;
use crate::models::CorrectedRecord;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS ClimateRecord (
    TimeStamp TEXT NOT NULL,
    Humidity REAL NOT NULL,
    Temperature REAL NOT NULL,
    Pressure REAL NOT NULL
)";

const INSERT_RECORD: &str =
    "INSERT INTO ClimateRecord (TimeStamp, Humidity, Temperature, Pressure) VALUES (?, ?, ?, ?)";

/// Append-only SQLite store for corrected records.
///
/// Single writer: the pool is capped at one connection, and each insert is
/// its own auto-committed transaction.
pub struct RecordSink {
    pool: SqlitePool,
}

impl RecordSink {
    /// Open the store at `path`, creating the database file if absent.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, ClimateError> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        debug!("opened record store at {}", path.as_ref().display());
        Ok(Self { pool })
    }

    /// In-memory store, for tests and dry runs.
    pub async fn open_in_memory() -> Result<Self, ClimateError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::new().in_memory(true))
            .await?;
        Ok(Self { pool })
    }

    /// Create the `ClimateRecord` table if it does not exist yet. Idempotent
    /// and safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<(), ClimateError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Append one record as a single auto-committed row.
    pub async fn append(&self, record: &CorrectedRecord) -> Result<(), ClimateError> {
        sqlx::query(INSERT_RECORD)
            .bind(&record.timestamp)
            .bind(record.ambient_humidity)
            .bind(record.ambient_temperature)
            .bind(record.ambient_pressure)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
