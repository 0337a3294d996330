use serde_json::{json, Map};

use crate::cli::utils::{connect, output_error, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::DatabaseManager;

pub async fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let database = config::config()
        .database
        .url
        .as_deref()
        .map(DatabaseManager::redacted_url)
        .unwrap_or_else(|| "<unset>".to_string());

    let result = match connect().await {
        Ok(pool) => DatabaseManager::health_check(&pool).await.map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => output_success(
            &output_format,
            &format!("Database reachable at {}", database),
            Some(Map::from_iter([("database".to_string(), json!(database))])),
        ),
        Err(e) => {
            output_error(
                &output_format,
                &format!("Database unreachable at {}: {}", database, e),
                "DATABASE_UNAVAILABLE",
            )?;
            std::process::exit(1);
        }
    }
}
