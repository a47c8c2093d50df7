//! Postgres implementation of TransactionRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{NewTransaction, Transaction, TransactionKind};
use crate::ports::{RepositoryError, RepositoryResult, TransactionRepository};

/// Postgres-backed transaction repository.
#[derive(Clone)]
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, symbol, kind, quantity, price, date FROM transactions ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionRow::into_domain).collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            "SELECT id, symbol, kind, quantity, price, date FROM transactions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TransactionRow::into_domain)
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn add(&self, tx: &NewTransaction) -> RepositoryResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(
            r#"
            INSERT INTO transactions (symbol, kind, quantity, price, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, symbol, kind, quantity, price, date
            "#,
        )
        .bind(&tx.symbol)
        .bind(tx.kind)
        .bind(&tx.quantity)
        .bind(&tx.price)
        .bind(tx.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_domain())
    }

    async fn edit(&self, tx: &Transaction) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET symbol = $2, kind = $3, quantity = $4, price = $5, date = $6
            WHERE id = $1
            "#,
        )
        .bind(tx.id)
        .bind(&tx.symbol)
        .bind(tx.kind)
        .bind(&tx.quantity)
        .bind(&tx.price)
        .bind(tx.date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(tx.id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    symbol: String,
    kind: TransactionKind,
    quantity: bigdecimal::BigDecimal,
    price: bigdecimal::BigDecimal,
    date: chrono::NaiveDate,
}

impl TransactionRow {
    fn into_domain(self) -> Transaction {
        Transaction {
            id: self.id,
            symbol: self.symbol,
            kind: self.kind,
            quantity: self.quantity,
            price: self.price,
            date: self.date,
        }
    }
}
