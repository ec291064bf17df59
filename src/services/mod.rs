pub(crate) mod analytics;
pub(crate) mod chat;
pub(crate) mod scoring;
pub(crate) mod weakness;
