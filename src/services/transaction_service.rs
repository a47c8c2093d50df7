//! Orchestration between the HTTP handlers and the repository.
//! Currently a pass-through: results and errors come back from the repository unchanged.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewTransaction, Transaction};
use crate::ports::{RepositoryResult, TransactionRepository};

#[async_trait]
pub trait TransactionService: Send + Sync {
    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Transaction>;
    async fn add(&self, tx: NewTransaction) -> RepositoryResult<Transaction>;
    async fn edit(&self, tx: Transaction) -> RepositoryResult<()>;
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

pub struct DefaultTransactionService {
    repository: Arc<dyn TransactionRepository>,
}

impl DefaultTransactionService {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TransactionService for DefaultTransactionService {
    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        self.repository.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Transaction> {
        self.repository.find_by_id(id).await
    }

    async fn add(&self, tx: NewTransaction) -> RepositoryResult<Transaction> {
        let created = self.repository.add(&tx).await?;
        tracing::debug!(id = created.id, symbol = %created.symbol, "transaction added");
        Ok(created)
    }

    async fn edit(&self, tx: Transaction) -> RepositoryResult<()> {
        self.repository.edit(&tx).await
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use crate::ports::RepositoryError;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    /// Records the calls it receives and fails every write.
    #[derive(Default)]
    struct RecordingRepository {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingRepository {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    #[async_trait]
    impl TransactionRepository for RecordingRepository {
        async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
            self.record("find_all");
            Ok(vec![sample(1)])
        }

        async fn find_by_id(&self, id: i64) -> RepositoryResult<Transaction> {
            self.record(format!("find_by_id:{id}"));
            Err(RepositoryError::NotFound(id))
        }

        async fn add(&self, tx: &NewTransaction) -> RepositoryResult<Transaction> {
            self.record(format!("add:{}", tx.symbol));
            Err(RepositoryError::Database(sqlx::Error::PoolClosed))
        }

        async fn edit(&self, tx: &Transaction) -> RepositoryResult<()> {
            self.record(format!("edit:{}", tx.id));
            Err(RepositoryError::NotFound(tx.id))
        }

        async fn delete(&self, id: i64) -> RepositoryResult<()> {
            self.record(format!("delete:{id}"));
            Err(RepositoryError::NotFound(id))
        }
    }

    fn sample(id: i64) -> Transaction {
        Transaction {
            id,
            symbol: "AAPL".to_string(),
            kind: TransactionKind::Buy,
            quantity: BigDecimal::from(1),
            price: BigDecimal::from(100),
            date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
        }
    }

    fn sample_new() -> NewTransaction {
        NewTransaction {
            symbol: "AAPL".to_string(),
            kind: TransactionKind::Buy,
            quantity: BigDecimal::from(1),
            price: BigDecimal::from(100),
            date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
        }
    }

    #[tokio::test]
    async fn forwards_every_operation_and_its_errors() {
        let repository = Arc::new(RecordingRepository::default());
        let service = DefaultTransactionService::new(repository.clone());

        assert_eq!(service.find_all().await.unwrap(), vec![sample(1)]);
        assert!(matches!(
            service.find_by_id(4).await,
            Err(RepositoryError::NotFound(4))
        ));
        assert!(matches!(
            service.add(sample_new()).await,
            Err(RepositoryError::Database(sqlx::Error::PoolClosed))
        ));
        assert!(matches!(
            service.edit(sample(5)).await,
            Err(RepositoryError::NotFound(5))
        ));
        assert!(matches!(
            service.delete(6).await,
            Err(RepositoryError::NotFound(6))
        ));

        let calls = repository.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec!["find_all", "find_by_id:4", "add:AAPL", "edit:5", "delete:6"]
        );
    }
}
