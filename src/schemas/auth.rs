use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct TokenResponse {
    pub(crate) token: String,
    #[serde(rename = "type")]
    pub(crate) token_type: String,
}

impl TokenResponse {
    pub(crate) fn bearer(token: String) -> Self {
        Self { token, token_type: "Bearer".to_string() }
    }
}
