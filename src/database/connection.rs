use mongodb::{Client, Database};

use crate::config::AppConfig;

/// Opens the shared MongoDB handle. The client pools connections internally,
/// so one `Database` handle is cloned into every request via `AppState`.
pub async fn connect(config: &AppConfig) -> (Client, Database) {
    let client = Client::with_uri_str(&config.mongo_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db = client.database(&config.db_name);

    // Verify the database is reachable by listing collections
    match db.list_collection_names().await {
        Ok(collections) => {
            println!("✅ Connected to database: {}", config.db_name);
            println!("📂 Collections found: {:?}", collections);
        }
        Err(e) => {
            eprintln!(
                "❌ Database '{}' may not exist or is inaccessible: {}",
                config.db_name, e
            );
        }
    }

    (client, db)
}
