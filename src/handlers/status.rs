use axum::{extract::State, response::Json};
use futures_util::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    errors::{AppError, Result},
    models::status::{StatusCheck, StatusCheckCreate},
    state::AppState,
};

const STATUS_CHECKS_COLLECTION: &str = "status_checks";
const STATUS_LIST_LIMIT: i64 = 1000;

// Record a status check ping from a named client
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(payload): Json<StatusCheckCreate>,
) -> Result<Json<StatusCheck>> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError::validation("client_name must not be empty"));
    }

    let collection: Collection<StatusCheck> = state.db.collection(STATUS_CHECKS_COLLECTION);

    let status = StatusCheck::new(payload.client_name);
    collection.insert_one(&status).await?;

    println!("✅ Logged status check from client: {}", status.client_name);
    Ok(Json(status))
}

// List recorded status checks (store order, capped)
pub async fn get_status_checks(State(state): State<AppState>) -> Result<Json<Vec<StatusCheck>>> {
    let collection: Collection<StatusCheck> = state.db.collection(STATUS_CHECKS_COLLECTION);

    let cursor = collection.find(doc! {}).limit(STATUS_LIST_LIMIT).await?;
    let status_checks: Vec<StatusCheck> = cursor.try_collect().await?;

    println!("✅ Fetched {} status checks", status_checks.len());
    Ok(Json(status_checks))
}
