// Quiz store - owns quiz and question records

use std::sync::Arc;

use libsql::Connection;

pub mod models;

mod quiz;
mod schema;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("quiz not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(#[source] BoxError),
}

impl Error {
    pub(crate) fn storage(err: impl Into<BoxError>) -> Self {
        Error::Storage(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

impl From<libsql::Error> for Error {
    fn from(err: libsql::Error) -> Self {
        Error::storage(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::storage(err)
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::storage(err)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// Main database handle
#[derive(Clone)]
pub struct Db {
    db: Arc<libsql::Database>,
    local: bool,
}

impl Db {
    /// Opens the store and prepares the schema. A `file:` url opens a local
    /// database file, anything else is treated as a remote libSQL server.
    pub async fn new(url: String, auth_token: Option<String>) -> Result<Self> {
        let local = url.starts_with("file:");
        let db = if local {
            let path = url.strip_prefix("file:").unwrap_or(&url);
            libsql::Builder::new_local(path).build().await?
        } else {
            libsql::Builder::new_remote(url.to_owned(), auth_token.unwrap_or_default())
                .build()
                .await?
        };

        let db = Self {
            db: Arc::new(db),
            local,
        };
        let conn = db.connect().await?;

        // Verify connection
        let one = conn
            .query("SELECT 1", ())
            .await?
            .next()
            .await?
            .ok_or_else(|| Error::storage("connection check failed"))?
            .get::<i64>(0)?;
        if one != 1 {
            return Err(Error::storage("connection check returned an unexpected value"));
        }

        schema::create_schema(&conn, local).await?;

        tracing::info!(local, "database connection has been verified");

        Ok(db)
    }

    /// Releases this handle. Pending clones keep the database open until
    /// they are dropped as well.
    pub fn close(self) {
        let remaining = Arc::strong_count(&self.db) - 1;
        drop(self);
        if remaining == 0 {
            tracing::info!("database closed");
        } else {
            tracing::warn!(remaining, "database handle released while still shared");
        }
    }

    async fn connect(&self) -> Result<Connection> {
        let conn = self.db.connect()?;
        if self.local {
            conn.execute("PRAGMA foreign_keys = ON", ()).await?;
            // busy_timeout reports the new value as a row
            conn.query("PRAGMA busy_timeout = 5000", ())
                .await?
                .next()
                .await?;
        }
        Ok(conn)
    }
}
