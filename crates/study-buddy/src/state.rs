//! Application state shared across all request handlers.

use std::sync::Arc;

use moka::future::Cache;

use crate::config::Config;
use crate::error::ApiError;
use crate::gemini::{GeminiClient, TextGenerator};
use crate::plan::PlanRequest;

/// Type alias for the generated-plan cache (cache key -> generated text).
pub type PlanCache = Cache<String, Arc<str>>;

/// Plan cache capacity (number of entries).
/// A generated plan is typically 5-15KB of text.
const PLAN_CACHE_CAPACITY: u64 = 1_000;

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,

    /// Text generator used for study plans.
    pub generator: Arc<dyn TextGenerator>,

    /// Generated-plan cache, absent when the configured TTL is zero.
    pub cache: Option<PlanCache>,
}

impl AppState {
    /// Create application state backed by the Gemini API.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let generator = GeminiClient::new(&config)?;
        Ok(Self::with_generator(config, Arc::new(generator)))
    }

    /// Create application state around any text generator.
    pub fn with_generator(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        let cache = (!config.plan_cache_ttl.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(PLAN_CACHE_CAPACITY)
                .time_to_live(config.plan_cache_ttl)
                .build()
        });

        tracing::info!(
            cache_enabled = cache.is_some(),
            cache_capacity = PLAN_CACHE_CAPACITY,
            cache_ttl_secs = config.plan_cache_ttl.as_secs(),
            "application state initialized"
        );

        Self {
            config: Arc::new(config),
            generator,
            cache,
        }
    }

    /// Generate the plan text for a validated request.
    ///
    /// Served from the cache when possible; only successful generations are
    /// cached.
    pub async fn generate_plan(&self, request: &PlanRequest) -> Result<Arc<str>, ApiError> {
        let key = request.cache_key();

        if let Some(cache) = &self.cache
            && let Some(text) = cache.get(&key).await
        {
            tracing::debug!(key = %key, "plan cache hit");
            return Ok(text);
        }

        tracing::info!(
            class_name = %request.class_name,
            hours = request.hours,
            level = request.level,
            "generating study plan"
        );

        let text: Arc<str> = self.generator.generate(&request.prompt()).await?.into();

        if let Some(cache) = &self.cache {
            cache.insert(key, text.clone()).await;
        }

        Ok(text)
    }
}
