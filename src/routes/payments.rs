use axum::{routing::get, Router};

use crate::handlers::payments::{
    create_payment_log, get_all_payments, get_group_payments, get_user_payments,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // GET /api/payments - All payment logs, newest first
        // POST /api/payments - Log a mock payment transaction
        .route("/", get(get_all_payments).post(create_payment_log))
        // GET /api/payments/user/:user_id - Payment history for one user
        .route("/user/:user_id", get(get_user_payments))
        // GET /api/payments/group/:group_id - Payment history for one group
        .route("/group/:group_id", get(get_group_payments))
}
