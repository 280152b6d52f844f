//! Application configuration loaded from environment variables.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "0.0.0.0:3000").
    pub bind_addr: String,

    /// Gemini API key. Never logged.
    pub gemini_api_key: String,

    /// Gemini model name used in the request path.
    pub gemini_model: String,

    /// Gemini API base URL, without a trailing slash.
    pub gemini_api_base: String,

    /// Sampling temperature sent as `generationConfig.temperature`.
    pub temperature: f32,

    /// Sent as `generationConfig.maxOutputTokens`.
    pub max_output_tokens: u32,

    /// Timeout for a single upstream generation call.
    pub request_timeout: Duration,

    /// Optional directory served for requests no route matches.
    pub static_dir: Option<String>,

    /// TTL of the generated-plan cache. Zero disables the cache.
    pub plan_cache_ttl: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("gemini_api_key", &"[REDACTED]")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base", &self.gemini_api_base)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("request_timeout", &self.request_timeout)
            .field("static_dir", &self.static_dir)
            .field("plan_cache_ttl", &self.plan_cache_ttl)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`: API key for the Gemini `generateContent` endpoint
    ///
    /// Optional:
    /// - `GEMINI_MODEL`: Model name (default: "gemini-2.0-flash")
    /// - `GEMINI_API_BASE`: API base URL (default: "https://generativelanguage.googleapis.com/v1beta")
    /// - `GEMINI_TEMPERATURE`: Sampling temperature (default: 0.7)
    /// - `GEMINI_MAX_OUTPUT_TOKENS`: Output token limit (default: 100000)
    /// - `GEMINI_TIMEOUT_SECS`: Upstream request timeout (default: 120)
    /// - `STUDY_BUDDY_BIND_ADDR`: Server bind address (default: "0.0.0.0:{PORT}")
    /// - `PORT`: Port used when no bind address is given (default: 3000)
    /// - `STUDY_BUDDY_STATIC_DIR`: Directory to serve static files from
    /// - `STUDY_BUDDY_PLAN_CACHE_TTL_SECS`: Plan cache TTL, 0 disables (default: 300)
    pub fn from_env() -> anyhow::Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .context("missing GEMINI_API_KEY")?;

        let gemini_model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-2.0-flash".to_string());

        let gemini_api_base = std::env::var("GEMINI_API_BASE")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string())
            .trim_end_matches('/')
            .to_string();

        let temperature = parse_env("GEMINI_TEMPERATURE", 0.7_f32)?;
        let max_output_tokens = parse_env("GEMINI_MAX_OUTPUT_TOKENS", 100_000_u32)?;
        let timeout_secs = parse_env("GEMINI_TIMEOUT_SECS", 120_u64)?;

        let bind_addr = match std::env::var("STUDY_BUDDY_BIND_ADDR") {
            Ok(addr) => addr,
            Err(_) => format!("0.0.0.0:{}", parse_env("PORT", 3000_u16)?),
        };

        let static_dir = std::env::var("STUDY_BUDDY_STATIC_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty());

        let cache_ttl_secs = parse_env("STUDY_BUDDY_PLAN_CACHE_TTL_SECS", 300_u64)?;

        tracing::info!(
            bind_addr = %bind_addr,
            gemini_model = %gemini_model,
            gemini_api_base = %gemini_api_base,
            temperature,
            max_output_tokens,
            timeout_secs,
            static_dir = ?static_dir,
            cache_ttl_secs,
            "configuration loaded"
        );

        Ok(Self {
            bind_addr,
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            temperature,
            max_output_tokens,
            request_timeout: Duration::from_secs(timeout_secs),
            static_dir,
            plan_cache_ttl: Duration::from_secs(cache_ttl_secs),
        })
    }
}

/// Read and parse an optional environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key} value {raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}
