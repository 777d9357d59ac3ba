use crate::config::AppConfig;
use crate::db::pool::DuckDbConnectionManager;
use crate::llm::LlmManager;
use r2d2::Pool;
use std::sync::Arc;

/// Shared application state for the web server.
///
/// The suggester is built once at startup and injected here, so there is no
/// lazy first-request initialization to race on.
pub struct AppState {
    pub config: AppConfig,
    pub db_pool: Pool<DuckDbConnectionManager>,
    pub llm_manager: Arc<LlmManager>,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db_pool: Pool<DuckDbConnectionManager>,
        llm_manager: LlmManager,
    ) -> Self {
        Self {
            config,
            db_pool,
            llm_manager: Arc::new(llm_manager),
            startup_time: chrono::Utc::now(),
        }
    }
}
