use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: None,
        }
    }
}

fn bad_request(message: &str, fields: serde_json::Map<String, serde_json::Value>) -> actix_web::Error {
    let error_response = ErrorResponse {
        message: message.to_string(),
        fields: Some(serde_json::Value::Object(fields)),
    };
    actix_web::error::InternalError::from_response(
        "",
        HttpResponse::BadRequest().json(error_response),
    )
    .into()
}

/// JSON extractor config shared by every job endpoint, turns extraction
/// and validation failures into 400 responses with per-field messages
pub fn json_config() -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .error_handler(|err, _req| {
            let mut fields = serde_json::Map::new();

            match err {
                actix_web_validator::Error::Validate(validation_errors) => {
                    for (field, errors) in validation_errors.field_errors() {
                        let messages: Vec<String> = errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
                            })
                            .collect();
                        fields.insert(
                            field.to_string(),
                            serde_json::json!({"errors": messages}),
                        );
                    }
                    bad_request("Validation failed", fields)
                }
                other => {
                    let err_string = other.to_string();
                    tracing::debug!("Rejected job payload: {}", err_string);

                    let message = if err_string.contains("EOF while parsing") {
                        "Request body is empty. Expected JSON payload".to_string()
                    } else if err_string.contains("missing field") || err_string.contains("invalid date") {
                        err_string
                    } else {
                        "Invalid JSON format".to_string()
                    };
                    fields.insert("message".to_string(), serde_json::json!(message));
                    bad_request("Request validation failed", fields)
                }
            }
        })
}
