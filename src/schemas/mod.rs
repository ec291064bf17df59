pub(crate) mod admin;
pub(crate) mod analysis;
pub(crate) mod analytics;
pub(crate) mod auth;
pub(crate) mod chat;
pub(crate) mod note;
pub(crate) mod quiz;
pub(crate) mod user;

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct RootResponse {
    pub(crate) message: String,
    pub(crate) version: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) service: String,
    pub(crate) status: String,
    pub(crate) components: HashMap<String, String>,
}
