//! Request dispatcher for the voice intent socket.
//!
//! Kept separate from `intent_server` so it can be unit-tested without a
//! socket. One request line in, one response line out.

use serde_json::{json, Value};
use tracing::debug;

use crate::services::voice_intent::{CommandSink, VoiceIntent};
use crate::types::errors::IntentError;
use crate::types::intent::{IntentRequest, IntentResponse};

/// Dispatches one intent method call.
pub fn handle_method(
    intent: &VoiceIntent,
    sink: &dyn CommandSink,
    method: &str,
    params: &Value,
) -> Result<Value, IntentError> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        "intent.describe" => Ok(json!({
            "definition": intent.definition(),
            "phrases": intent.phrases(),
        })),

        "intent.perform" => {
            let command = params
                .get("command")
                .and_then(Value::as_str)
                .unwrap_or("");
            let outcome = intent.perform(command, sink)?;
            Ok(json!({"id": outcome.command.id, "dialog": outcome.dialog}))
        }

        "intent.utter" => {
            let utterance = params
                .get("utterance")
                .and_then(Value::as_str)
                .ok_or_else(|| IntentError::BadRequest("missing utterance".to_string()))?;
            let command = intent.match_utterance(utterance)?;
            let outcome = intent.perform(&command, sink)?;
            Ok(json!({"id": outcome.command.id, "dialog": outcome.dialog, "command": command}))
        }

        other => Err(IntentError::UnknownMethod(other.to_string())),
    }
}

/// Handles one raw request line and returns the serialized response line.
pub fn handle_line(intent: &VoiceIntent, sink: &dyn CommandSink, line: &str) -> String {
    let response = match serde_json::from_str::<IntentRequest>(line) {
        Ok(req) => {
            debug!(method = %req.method, "intent request");
            match handle_method(intent, sink, &req.method, &req.params) {
                Ok(result) => IntentResponse::ok(req.id, result),
                Err(e) => IntentResponse::err(req.id, e.to_string()),
            }
        }
        Err(e) => IntentResponse::err(Value::Null, format!("parse error: {}", e)),
    };
    serde_json::to_string(&response).unwrap_or_else(|e| {
        json!({"id": null, "error": format!("serialize error: {}", e)}).to_string()
    })
}
