use serde_json::{json, Value};

use super::OutputFormat;
use crate::client::ClientError;

/// Print a success message in the appropriate format
pub fn output_success(output: &OutputFormat, message: &str, data: Option<&Value>) {
    match output {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });
            if let Some(data) = data {
                response["data"] = data.clone();
            }
            println!("{}", serde_json::to_string_pretty(&response).unwrap_or_default());
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
}

/// Print a normalized error shape in the appropriate format
pub fn output_error(output: &OutputFormat, error: &ClientError) {
    match output {
        OutputFormat::Json => {
            let response = json!({
                "success": false,
                "error": error.message,
                "status": error.status
            });
            println!("{}", serde_json::to_string_pretty(&response).unwrap_or_default());
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", error.message);
        }
    }
}
