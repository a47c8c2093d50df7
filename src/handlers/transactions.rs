use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{NewTransaction, Transaction};
use crate::error::AppError;
use crate::ports::RepositoryError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: i64,
}

pub async fn find_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let transactions = state.transactions.find_all().await?;

    Ok(Json(json!({ "transactions": transactions })))
}

pub async fn find_by_id(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(id) = id?;

    let transaction = state
        .transactions
        .find_by_id(id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound(id) => AppError::NotFound(format!("transaction {id}")),
            e => AppError::Repository(e),
        })?;

    Ok(Json(json!({ "transaction": transaction })))
}

pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(new_tx) = payload?;

    let created = state.transactions.add(new_tx).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Added successfully", "id": created.id })),
    ))
}

pub async fn edit(
    State(state): State<AppState>,
    payload: Result<Json<Transaction>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(tx) = payload?;

    state.transactions.edit(tx).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "Updated successfully" })),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;

    state.transactions.delete(request.id).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "Deleted successfully" })),
    ))
}
