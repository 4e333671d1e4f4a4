use std::{sync::Arc, time::Duration};

use reqwest::Client;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub http: Client,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        // One pooled client for the process; each inbound request
        // borrows it for its single upstream call.
        let http = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .expect("HTTP client misconfigured!");

        Arc::new(Self { config, http })
    }
}
