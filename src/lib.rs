pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod shutdown;
pub mod startup;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::services::TransactionService;

#[derive(Clone)]
pub struct AppState {
    pub transactions: Arc<dyn TransactionService>,
}

impl AppState {
    pub fn new(transactions: Arc<dyn TransactionService>) -> Self {
        Self { transactions }
    }
}

pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route("/txn", get(handlers::transactions::find_all))
        .route("/txn/:id", get(handlers::transactions::find_by_id))
        .route("/txn/add", post(handlers::transactions::add))
        .route("/txn/edit", post(handlers::transactions::edit))
        .route("/txn/delete", delete(handlers::transactions::delete));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(middleware::cors::cors_layer())
        .layer(axum::middleware::from_fn(
            middleware::cors::preflight_no_content,
        ))
        .layer(axum::middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
}
