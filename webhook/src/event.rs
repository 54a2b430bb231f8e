use anyhow::{Context, Result};
use heartbeat_core::pipeline::Outcome;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Query parameters of an API Gateway or Function URL event.
///
/// A missing or `null` map means the tracker sent no parameters.
pub(crate) fn query_parameters(payload: &Value) -> Result<HashMap<String, String>> {
    match payload.get("queryStringParameters") {
        None | Some(Value::Null) => Ok(HashMap::new()),
        Some(params) => serde_json::from_value(params.clone())
            .context("Expected 'queryStringParameters' to be a map of strings"),
    }
}

/// API Gateway proxy response for the outcome.
pub(crate) fn response(outcome: &Outcome) -> Value {
    json!({
        "statusCode": outcome.status_code(),
        "headers": {"Content-Type": "application/json"},
        "body": outcome.body().to_string(),
    })
}
