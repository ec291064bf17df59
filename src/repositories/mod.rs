pub(crate) mod learning_resources;
pub(crate) mod notes;
pub(crate) mod questions;
pub(crate) mod quiz_attempts;
pub(crate) mod quiz_results;
pub(crate) mod subjects;
pub(crate) mod topics;
pub(crate) mod users;
pub(crate) mod weakness_analyses;
