use serde::Serialize;
use serde_json::{json, Map, Value};
use sqlx::PgPool;

use crate::cli::OutputFormat;
use crate::config;
use crate::database::DatabaseManager;

/// Connect using the same configuration as the server
pub async fn connect() -> anyhow::Result<PgPool> {
    let pool = DatabaseManager::connect(&config::config().database).await?;
    Ok(pool)
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `{"success": true, "message": ...}` plus any extra keys, or a check-marked line
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    extra: Option<Map<String, Value>>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut body = Map::new();
            body.insert("success".to_string(), Value::Bool(true));
            body.insert("message".to_string(), Value::String(message.to_string()));
            body.extend(extra.unwrap_or_default());
            print_json(&body)
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
            Ok(())
        }
    }
}

/// Failure report; text mode writes to stderr
pub fn output_error(output_format: &OutputFormat, message: &str, error_code: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => print_json(&json!({
            "success": false,
            "error": message,
            "error_code": error_code,
        })),
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
            Ok(())
        }
    }
}
