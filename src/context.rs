use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::GenerationService;
use crate::workflow::cards::CardSource;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub generator: Arc<dyn GenerationService>,
    pub cards: CardSource,
}

impl AppContext {
    pub fn new(config: AppConfig, generator: Arc<dyn GenerationService>, cards: CardSource) -> Self {
        Self {
            config,
            generator,
            cards,
        }
    }
}
