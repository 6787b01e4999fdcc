use std::sync::Arc;

use crate::auth::TokenMaker;
use crate::config::AppConfig;
use crate::database::Store;

/// Shared handles cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub token_maker: Arc<dyn TokenMaker>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, token_maker: Arc<dyn TokenMaker>, config: AppConfig) -> Self {
        Self {
            store,
            token_maker,
            config: Arc::new(config),
        }
    }
}
