use std::sync::Arc;

use loupe_core::cache::TranslationCache;
use loupe_core::text::collapse_lines;

use crate::{ProviderMetadata, TranslateError, Translator};

/// Fixed language pair translator guarded by the shared LRU cache.
///
/// The cleaned input is both the cache key and the network query, so a hit
/// and a miss always agree on what was asked.
pub struct CachedTranslator {
    inner: Arc<dyn Translator>,
    cache: Arc<TranslationCache>,
    from: String,
    to: String,
}

impl CachedTranslator {
    pub fn new(
        inner: Arc<dyn Translator>,
        cache: Arc<TranslationCache>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            cache,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn from_lang(&self) -> &str {
        &self.from
    }

    pub fn to_lang(&self) -> &str {
        &self.to
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    /// Metadata of the backend behind the cache
    pub fn provider(&self) -> ProviderMetadata {
        self.inner.metadata()
    }

    /// Empty input returns `""` without consulting the cache or the network.
    pub async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let query = collapse_lines(text);
        if query.is_empty() {
            return Ok(String::new());
        }

        if let Some(hit) = self.cache.get(&query) {
            tracing::debug!("translation cache hit ({} chars)", query.len());
            return Ok(hit);
        }

        let translation = self.inner.translate(&query, &self.from, &self.to).await?;
        if translation.text.trim().is_empty() {
            return Err(TranslateError::EmptyTranslation);
        }

        tracing::debug!(
            "translated {} chars via {}",
            query.len(),
            translation.provider
        );
        self.cache.put(query, translation.text.clone());
        Ok(translation.text)
    }
}
