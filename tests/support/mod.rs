#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use portfolio_txn::domain::{NewTransaction, Transaction, TransactionKind};
use portfolio_txn::ports::{RepositoryError, RepositoryResult, TransactionRepository};
use portfolio_txn::services::DefaultTransactionService;
use portfolio_txn::{create_app, AppState};
use serde_json::Value;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory stand-in for the Postgres repository.
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    rows: Mutex<Vec<Transaction>>,
    next_id: Mutex<i64>,
    calls: AtomicUsize,
    fail: Mutex<bool>,
}

impl InMemoryTransactionRepository {
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.rows.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail as if the database were gone.
    pub fn break_connection(&self) {
        *self.fail.lock().unwrap() = true;
    }

    fn enter(&self) -> RepositoryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail.lock().unwrap() {
            return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Transaction>> {
        self.enter()?;
        Ok(self.snapshot())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Transaction> {
        self.enter()?;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn add(&self, tx: &NewTransaction) -> RepositoryResult<Transaction> {
        self.enter()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = tx.clone().with_id(*next_id);
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn edit(&self, tx: &Transaction) -> RepositoryResult<()> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|row| row.id == tx.id)
            .ok_or(RepositoryError::NotFound(tx.id))?;
        *row = tx.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }
}

pub fn test_app() -> (Router, Arc<InMemoryTransactionRepository>) {
    let repository = Arc::new(InMemoryTransactionRepository::default());
    let service = Arc::new(DefaultTransactionService::new(repository.clone()));
    (create_app(AppState::new(service)), repository)
}

pub fn sample(symbol: &str) -> NewTransaction {
    NewTransaction {
        symbol: symbol.to_string(),
        kind: TransactionKind::Buy,
        quantity: BigDecimal::from_str("2.5").unwrap(),
        price: BigDecimal::from_str("101.25").unwrap(),
        date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
