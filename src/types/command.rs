use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-text command received through the voice intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub id: Uuid,
    pub text: String,
}

impl VoiceCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }
}
