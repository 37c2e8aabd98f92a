use axum::{routing::get, Router};

use crate::handlers::status::{create_status_check, get_status_checks};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // GET /api/status - List recorded status checks
        // POST /api/status - Record a new status check
        .route("/", get(get_status_checks).post(create_status_check))
}
