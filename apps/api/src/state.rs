use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::store::CvStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Candidate records. The matching engine only ever sees cloned snapshots.
    pub store: Arc<RwLock<CvStore>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(CvStore::new(config.retention_days))),
            config,
        }
    }
}
