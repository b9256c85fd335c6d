use std::env;

use crate::error::EngineError;

/// Placeholder value shipped in .env templates; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub request: RequestConfig,
    pub logging: LoggingConfig,
    pub limits: AnalysisLimits,
}

/// Remote model backend configuration.
///
/// The API key is deliberately optional: running without a credential is an
/// expected deployment mode in which every capability serves its rule-based
/// fallback.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

/// HTTP request configuration
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Tuning values shared by both analysis paths: result cardinality caps,
/// the fixed fallback confidence, and the short-input threshold.
#[derive(Debug, Clone)]
pub struct AnalysisLimits {
    pub max_distortions: usize,
    pub max_reframes: usize,
    pub max_emotions: usize,
    pub max_themes: usize,
    pub max_exercises: usize,
    pub max_plan_steps: usize,
    pub fallback_confidence: f64,
    pub min_analysis_chars: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, EngineError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty() && k != PLACEHOLDER_API_KEY);

        let backend = BackendConfig {
            api_key,
            base_url: env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),
            model: env::var("ANALYSIS_MODEL")
                .unwrap_or_else(|_| "claude-3-haiku-20240307".to_string()),
        };

        let request = RequestConfig {
            timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30000),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let limits = AnalysisLimits {
            fallback_confidence: env::var("FALLBACK_CONFIDENCE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(|| AnalysisLimits::default().fallback_confidence),
            ..AnalysisLimits::default()
        };

        Ok(Config {
            backend,
            request,
            logging,
            limits,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self { timeout_ms: 30000 }
    }
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_distortions: 3,
            max_reframes: 2,
            max_emotions: 2,
            max_themes: 2,
            max_exercises: 3,
            max_plan_steps: 5,
            fallback_confidence: 0.6,
            min_analysis_chars: 10,
        }
    }
}
