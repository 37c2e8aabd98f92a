use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod database;
mod errors;
mod handlers;
mod models;
mod routes;
mod state;

use config::AppConfig;
use database::connection::connect;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    let (client, db) = connect(&config).await;
    let app_state = AppState::new(db);

    let app = build_router(app_state);
    start_server(app, &config).await;

    // Server loop has exited on the shutdown path; release the store handle.
    client.shutdown().await;
    tracing::info!("MongoDB client closed");
}

fn build_router(app_state: AppState) -> Router {
    // Wide-open CORS, prototype deployments only. Credentials stay off because
    // tower-http refuses a wildcard origin combined with allow_credentials.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/api", get(root_handler))
        .route("/api/health", get(health_check))
        .nest("/api/status", routes::status::routes())
        .nest("/api/payments", routes::payments::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn start_server(app: Router, config: &AppConfig) {
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!("🚀 Server starting on {}", addr);

    match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .unwrap();
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Community Sharing App API",
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    // The driver connects lazily, so routes that never touch a collection can
    // be exercised without a running database.
    async fn test_router() -> Router {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        build_router(AppState::new(client.database("community_share_test")))
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_returns_greeting() {
        let app = test_router().await;

        let response = app
            .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Community Sharing App API");
    }

    #[tokio::test]
    async fn health_reports_healthy_with_valid_timestamp() {
        let app = test_router().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        let ts = json["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn status_check_with_blank_client_name_is_rejected() {
        let app = test_router().await;

        let response = app
            .oneshot(json_post("/api/status", r#"{"client_name": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("client_name"));
    }

    #[tokio::test]
    async fn status_check_with_missing_field_is_rejected() {
        let app = test_router().await;

        let response = app.oneshot(json_post("/api/status", "{}")).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn payment_with_missing_required_field_is_rejected() {
        let app = test_router().await;

        // user_email absent
        let body = r#"{
            "user_id": "u1",
            "user_name": "U One",
            "group_id": "g1",
            "group_name": "Netflix",
            "amount": "₹499/month",
            "payment_type": "subscription"
        }"#;
        let response = app.oneshot(json_post("/api/payments", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn payment_with_empty_group_id_is_rejected() {
        let app = test_router().await;

        let body = r#"{
            "user_id": "u1",
            "user_email": "u1@x.com",
            "user_name": "U One",
            "group_id": "",
            "group_name": "Netflix",
            "amount": "₹499/month",
            "payment_type": "subscription"
        }"#;
        let response = app.oneshot(json_post("/api/payments", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["message"].as_str().unwrap().contains("group_id"));
    }
}
