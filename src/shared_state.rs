use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;

/// Read-only state handed to every handler. Calculations themselves are stateless.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
