use axum::{
    extract::{Path, State},
    response::Json,
};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    Collection,
};

use crate::{
    errors::{AppError, Result},
    models::payment::{PaymentLog, PaymentLogCreate},
    state::AppState,
};

const PAYMENTS_COLLECTION: &str = "payments";
const ALL_PAYMENTS_LIMIT: i64 = 1000;
const FILTERED_PAYMENTS_LIMIT: i64 = 100;

fn newest_first() -> Document {
    doc! { "created_at": -1 }
}

fn user_filter(user_id: &str) -> Document {
    doc! { "user_id": user_id }
}

fn group_filter(group_id: &str) -> Document {
    doc! { "group_id": group_id }
}

// Log a payment transaction (for mock payments)
pub async fn create_payment_log(
    State(state): State<AppState>,
    Json(payload): Json<PaymentLogCreate>,
) -> Result<Json<PaymentLog>> {
    validate_payment(&payload)?;

    let collection: Collection<PaymentLog> = state.db.collection(PAYMENTS_COLLECTION);

    let payment = PaymentLog::from_create(payload);
    collection.insert_one(&payment).await?;

    println!(
        "✅ Logged {} payment of {} for group {}",
        payment.payment_type, payment.amount, payment.group_name
    );
    Ok(Json(payment))
}

fn validate_payment(payload: &PaymentLogCreate) -> Result<()> {
    let required = [
        ("user_id", &payload.user_id),
        ("user_email", &payload.user_email),
        ("user_name", &payload.user_name),
        ("group_id", &payload.group_id),
        ("group_name", &payload.group_name),
        ("amount", &payload.amount),
        ("payment_type", &payload.payment_type),
    ];

    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "missing required field(s): {}",
            missing.join(", ")
        )))
    }
}

// Get all payment logs (for admin), newest first
pub async fn get_all_payments(State(state): State<AppState>) -> Result<Json<Vec<PaymentLog>>> {
    let collection: Collection<PaymentLog> = state.db.collection(PAYMENTS_COLLECTION);

    let cursor = collection
        .find(doc! {})
        .sort(newest_first())
        .limit(ALL_PAYMENTS_LIMIT)
        .await?;
    let payments: Vec<PaymentLog> = cursor.try_collect().await?;

    println!("✅ Fetched {} payments", payments.len());
    Ok(Json(payments))
}

// Get payment history for a specific user, newest first.
// An unknown user_id is not an error; it just yields an empty list.
pub async fn get_user_payments(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<PaymentLog>>> {
    let collection: Collection<PaymentLog> = state.db.collection(PAYMENTS_COLLECTION);

    let cursor = collection
        .find(user_filter(&user_id))
        .sort(newest_first())
        .limit(FILTERED_PAYMENTS_LIMIT)
        .await?;
    let payments: Vec<PaymentLog> = cursor.try_collect().await?;

    println!("✅ Fetched {} payments for user {}", payments.len(), user_id);
    Ok(Json(payments))
}

// Get payment history for a specific group, newest first
pub async fn get_group_payments(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<PaymentLog>>> {
    let collection: Collection<PaymentLog> = state.db.collection(PAYMENTS_COLLECTION);

    let cursor = collection
        .find(group_filter(&group_id))
        .sort(newest_first())
        .limit(FILTERED_PAYMENTS_LIMIT)
        .await?;
    let payments: Vec<PaymentLog> = cursor.try_collect().await?;

    println!("✅ Fetched {} payments for group {}", payments.len(), group_id);
    Ok(Json(payments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(overrides: serde_json::Value) -> PaymentLogCreate {
        let mut base = json!({
            "user_id": "u1",
            "user_email": "u1@x.com",
            "user_name": "U One",
            "group_id": "g1",
            "group_name": "Netflix",
            "amount": "₹499/month",
            "payment_type": "subscription"
        });
        base.as_object_mut()
            .unwrap()
            .extend(overrides.as_object().unwrap().clone());
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn complete_payload_passes_validation() {
        assert!(validate_payment(&payload(json!({}))).is_ok());
    }

    #[test]
    fn user_listing_filters_on_user_id_only() {
        assert_eq!(user_filter("u1"), doc! { "user_id": "u1" });
    }

    #[test]
    fn group_listing_filters_on_group_id_only() {
        assert_eq!(group_filter("g1"), doc! { "group_id": "g1" });
    }

    #[test]
    fn listings_sort_by_created_at_descending() {
        assert_eq!(newest_first(), doc! { "created_at": -1 });
    }

    #[test]
    fn empty_fields_are_reported_by_name() {
        let err = validate_payment(&payload(json!({"group_id": "", "amount": "  "})))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("group_id"));
        assert!(message.contains("amount"));
        assert!(!message.contains("user_id"));
    }
}
