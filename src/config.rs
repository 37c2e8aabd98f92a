// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_url: String,
    pub db_name: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Variable lookup is injected so tests never mutate process environment
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        AppConfig {
            mongo_url: get("MONGO_URL").expect("MONGO_URL must be set"),
            db_name: get("DB_NAME").expect("DB_NAME must be set"),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: get("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse()
                .expect("PORT must be a number"),
        }
    }
}
