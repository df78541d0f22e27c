//! Failure modes of the crowdfund indexer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    /// SQLite query or connection failure.
    #[error("sqlite: {0}")]
    Database(#[from] sqlx::Error),

    #[error("schema migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// The RPC node could not be reached or returned an unreadable body.
    #[error("rpc transport: {0}")]
    Http(#[from] reqwest::Error),

    /// The RPC node answered with a JSON-RPC error we do not retry.
    #[error("rpc rejected getEvents ({code}): {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A `getEvents` page or event body did not have the expected shape.
    #[error("undecodable event: {0}")]
    EventParse(String),

    /// A stored amount is not a decimal `i128`, or a total overflowed.
    #[error("bad amount: {0}")]
    Amount(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
