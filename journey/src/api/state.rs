use std::sync::Arc;

use crate::config::Config;
use crate::llm::LlmProvider;
use crate::services::Dashboard;
use crate::store::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: LlmProvider,
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(config: Config, store: RecordStore, llm: LlmProvider) -> Self {
        let dashboard = Dashboard::new(store, llm.clone(), &config.assistant);

        Self {
            config: Arc::new(config),
            llm,
            dashboard,
        }
    }
}
