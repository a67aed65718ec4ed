use std::num::NonZeroUsize;
use std::sync::Arc;

use loupe_config::Config;
use loupe_core::cache::TranslationCache;

pub struct AppState {
    pub config: Config,
    /// Built once here and handed to every pipeline worker
    pub cache: Arc<TranslationCache>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.translator.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        tracing::debug!("translation cache capacity {}", capacity);

        Self {
            config,
            cache: Arc::new(TranslationCache::new(capacity)),
        }
    }
}
