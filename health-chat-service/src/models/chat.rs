use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`. Only the presence of `message` is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Provider text, relayed unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}
