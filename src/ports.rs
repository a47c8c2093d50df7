//! Storage port for transactions.
//! Adapters implement [`TransactionRepository`]; the service layer only sees this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewTransaction, Transaction};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("transaction {0} not found")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// All transactions, ordered by id.
    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Transaction>;

    /// Inserts a transaction and returns it with the id assigned by the store.
    async fn add(&self, tx: &NewTransaction) -> RepositoryResult<Transaction>;

    /// Replaces every field of the transaction identified by `tx.id`.
    /// Fails with [`RepositoryError::NotFound`] when no row matches.
    async fn edit(&self, tx: &Transaction) -> RepositoryResult<()>;

    /// Fails with [`RepositoryError::NotFound`] when no row matches.
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}
