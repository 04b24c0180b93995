//! Shared application state handed to every handler.

use crate::config::{AppConfig, Environment};
use crate::store::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: UserStore, config: AppConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }

    pub fn environment(&self) -> Environment {
        self.config.environment
    }
}
