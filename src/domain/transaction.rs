//! Transaction domain entity.
//! A single portfolio entry (buy or sell) as stored and exchanged over the API.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a portfolio entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "transaction_kind", rename_all = "lowercase")]
pub enum TransactionKind {
    Buy,
    Sell,
}

/// A persisted transaction. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub quantity: BigDecimal,
    pub price: BigDecimal,
    pub date: NaiveDate,
}

/// Payload for creating a transaction. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub symbol: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub quantity: BigDecimal,
    pub price: BigDecimal,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Attaches a store-assigned id. In-memory repositories use this to mint records.
    pub fn with_id(self, id: i64) -> Transaction {
        Transaction {
            id,
            symbol: self.symbol,
            kind: self.kind,
            quantity: self.quantity,
            price: self.price,
            date: self.date,
        }
    }
}
