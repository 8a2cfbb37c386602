mod prompt_api;

use std::sync::Arc;

use anyhow::Result;
pub use prompt_api::*;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendHandle;

pub struct BackendManager {}

impl BackendManager {
    /// Builds the backend from the loaded configuration. Called once at
    /// startup, after `Config::load`.
    pub fn get() -> Result<BackendHandle> {
        let timeout = Config::get(ConfigKey::BackendHealthCheckTimeout).parse::<u64>()?;
        let backend = PromptApi::new(&Config::get(ConfigKey::BackendURL), timeout);
        tracing::debug!(url = backend.url(), "Using prompt service");

        return Ok(Arc::new(backend));
    }
}
