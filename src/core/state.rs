use std::sync::Arc;

use sqlx::PgPool;

use crate::core::config::Settings;
use crate::services::chat::ChatService;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    db: PgPool,
    chat: ChatService,
}

impl AppState {
    pub(crate) fn new(settings: Settings, db: PgPool, chat: ChatService) -> Self {
        Self { inner: Arc::new(InnerState { settings, db, chat }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn db(&self) -> &PgPool {
        &self.inner.db
    }

    pub(crate) fn chat(&self) -> &ChatService {
        &self.inner.chat
    }
}
