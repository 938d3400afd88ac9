use crate::api::{ApiError, BackendClient};
use crate::config::Config;
use crate::ui::PageContext;

#[derive(Clone)]
pub struct AppState {
    pub api: BackendClient,
    pub page: PageContext,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Ok(Self {
            api: BackendClient::new(&config.backend_url, config.backend_timeout)?,
            page: PageContext {
                locale: config.locale,
                dismiss_ms: config.notice_dismiss_ms,
            },
        })
    }
}
