// models/payment.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PAYMENT_STATUS_COMPLETED: &str = "completed";
pub const DEFAULT_PAYMENT_METHOD: &str = "mock_payment";
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLog {
    pub id: String,

    pub user_id: String,
    pub user_email: String,
    pub user_name: String,

    pub group_id: String,
    pub group_name: String,

    // Free-text amount, stored exactly as the caller formatted it
    // (e.g. "₹499/month")
    pub amount: String,
    pub payment_type: String,   // "subscription" or "renewal"
    pub payment_status: String, // only "completed" is ever written
    pub payment_method: String,

    #[serde(with = "crate::models::datetime")]
    pub subscription_start_date: DateTime<Utc>,
    #[serde(with = "crate::models::datetime")]
    pub subscription_end_date: DateTime<Utc>,
    #[serde(with = "crate::models::datetime")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct PaymentLogCreate {
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub group_id: String,
    pub group_name: String,
    pub amount: String,
    pub payment_type: String,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    DEFAULT_PAYMENT_METHOD.to_string()
}

impl PaymentLog {
    /// Stamps the full record from the create payload: fresh id, `completed`
    /// status, and a subscription window of exactly 30 days from now.
    pub fn from_create(input: PaymentLogCreate) -> Self {
        let now = Utc::now();
        PaymentLog {
            id: Uuid::new_v4().to_string(),
            user_id: input.user_id,
            user_email: input.user_email,
            user_name: input.user_name,
            group_id: input.group_id,
            group_name: input.group_name,
            amount: input.amount,
            payment_type: input.payment_type,
            payment_status: PAYMENT_STATUS_COMPLETED.to_string(),
            payment_method: input.payment_method,
            subscription_start_date: now,
            subscription_end_date: now + Duration::days(SUBSCRIPTION_PERIOD_DAYS),
            created_at: now,
        }
    }
}
