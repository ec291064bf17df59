use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessageRequest {
    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessageResponse {
    pub(crate) reply: String,
}
