//! Store error types.

/// Errors raised by a [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// redb database error.
    #[error("redb error: {0}")]
    Redb(#[from] redb::DatabaseError),

    /// redb table error.
    #[error("redb table error: {0}")]
    Table(#[from] redb::TableError),

    /// redb storage error.
    #[error("redb storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// redb commit error.
    #[error("redb commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// redb transaction error.
    #[error("redb transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),

    /// A stored document could not be encoded or decoded.
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// The store rejected or could not complete the operation.
    ///
    /// For [`DocumentStore`](crate::DocumentStore) implementations backed
    /// by a remote service, such as a lost connection or a server-side
    /// rejection. The synchronization engine records such an upsert as
    /// failed and continues with the next record.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<redb::TransactionError> for StoreError {
    fn from(e: redb::TransactionError) -> Self {
        Self::Transaction(Box::new(e))
    }
}
