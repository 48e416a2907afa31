use std::sync::Arc;

use crate::config::AppConfig;
use crate::utils::http_client::Forwarder;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub forwarder: Arc<dyn Forwarder>,
}

impl AppState {
    pub fn location_id(&self) -> &str {
        &self.config.ghl.location_id
    }
}
