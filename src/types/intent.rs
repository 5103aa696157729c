use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static description of a phrase-triggered intent, as presented to the
/// voice assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentDefinition {
    pub title: String,
    pub description: String,
    /// Phrase templates; `{app}` is replaced by the application name.
    pub phrases: Vec<String>,
    pub parameter_title: String,
    pub parameter_description: String,
    /// Dialog used to ask for the parameter when it is missing.
    pub parameter_prompt: String,
    pub short_title: String,
    pub system_image: String,
    pub open_app_when_run: bool,
}

/// One request line on the intent socket.
///
/// `{"id":1, "method":"intent.perform", "params":{"command":"..."}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// One response line on the intent socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResponse {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntentResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self { id, result: Some(result), error: None }
    }

    pub fn err(id: Value, error: impl Into<String>) -> Self {
        Self { id, result: None, error: Some(error.into()) }
    }
}
