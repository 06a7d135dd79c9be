//! Configuration for the college finder.
//!
//! Values come from three places, in increasing priority:
//! 1. Built-in defaults (clap `default_value`)
//! 2. CLI flags / environment variables
//! 3. An optional TOML file passed with `--config`
//!
//! Everything resolves into a validated [`FinderConfig`]. The API key is
//! the only value that changes behavior by its mere presence: without it
//! every answer comes from the deterministic fallback.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use llm_client::{GenerationOptions, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use pipeline::MatchPolicy;
use serde::Deserialize;

use crate::emitter::PacingConfig;

/// Flags shared by every command that runs the finder pipeline.
#[derive(Debug, Clone, Args)]
pub struct FinderArgs {
    /// Address the HTTP server listens on
    #[arg(long, env = "COLLEGE_FINDER_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// JSON catalog file; the built-in catalog is used when omitted
    #[arg(long, env = "COLLEGE_FINDER_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// TOML file whose values override flags and environment
    #[arg(long, env = "COLLEGE_FINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Credential for the content-generation API
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub gemini_endpoint: String,

    #[arg(long, default_value_t = 5000)]
    pub max_output_tokens: u32,

    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    /// Timeout for the LLM call in seconds, 0 disables it
    #[arg(long, default_value_t = 60)]
    pub llm_timeout_secs: u64,

    /// Lower bound of the delay between streamed words
    #[arg(long, default_value_t = 30)]
    pub min_delay_ms: u64,

    /// Upper bound of the delay between streamed words
    #[arg(long, default_value_t = 70)]
    pub max_delay_ms: u64,

    /// How search terms combine: "all" or "any"
    #[arg(long, default_value_t = MatchPolicy::All)]
    pub match_policy: MatchPolicy,
}

/// Optional TOML overrides.
///
/// ```toml
/// bind = "0.0.0.0:8080"
/// catalog = "data/colleges.json"
/// match_policy = "all"
///
/// [gemini]
/// model = "gemini-3-flash-preview"
/// max_output_tokens = 2000
///
/// [stream]
/// min_delay_ms = 0
/// max_delay_ms = 0
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind: Option<SocketAddr>,
    pub catalog: Option<PathBuf>,
    pub match_policy: Option<MatchPolicy>,
    pub gemini: Option<GeminiFileConfig>,
    pub stream: Option<StreamFileConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiFileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamFileConfig {
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// An API credential that never shows up in Debug output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Blank keys count as "not configured"
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    pub bind: SocketAddr,
    pub catalog_path: Option<PathBuf>,
    pub gemini_api_key: Option<ApiKey>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
    pub generation: GenerationOptions,
    pub pacing: PacingConfig,
    pub match_policy: MatchPolicy,
}

impl FinderConfig {
    /// Read the optional config file named by `args` and resolve.
    pub fn load(args: &FinderArgs) -> Result<Self> {
        let file_config = match &args.config {
            Some(path) => Some(FileConfig::load(path)?),
            None => None,
        };
        Self::resolve(args, file_config)
    }

    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(args: &FinderArgs, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let gemini = file.gemini.unwrap_or_default();
        let stream = file.stream.unwrap_or_default();

        let api_key = gemini
            .api_key
            .or_else(|| args.gemini_api_key.clone())
            .and_then(ApiKey::new);

        let timeout_secs = gemini.timeout_secs.unwrap_or(args.llm_timeout_secs);
        let generation = GenerationOptions {
            temperature: gemini.temperature.unwrap_or(args.temperature),
            max_output_tokens: gemini.max_output_tokens.unwrap_or(args.max_output_tokens),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        };

        let pacing = PacingConfig {
            min_delay: Duration::from_millis(stream.min_delay_ms.unwrap_or(args.min_delay_ms)),
            max_delay: Duration::from_millis(stream.max_delay_ms.unwrap_or(args.max_delay_ms)),
        };

        let config = Self {
            bind: file.bind.unwrap_or(args.bind),
            catalog_path: file.catalog.or_else(|| args.catalog.clone()),
            gemini_api_key: api_key,
            gemini_model: gemini.model.unwrap_or_else(|| args.gemini_model.clone()),
            gemini_endpoint: gemini.endpoint.unwrap_or_else(|| args.gemini_endpoint.clone()),
            generation,
            pacing,
            match_policy: file.match_policy.unwrap_or(args.match_policy),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.pacing.min_delay > self.pacing.max_delay {
            bail!(
                "min delay ({:?}) must not exceed max delay ({:?})",
                self.pacing.min_delay,
                self.pacing.max_delay
            );
        }
        if self.generation.max_output_tokens == 0 {
            bail!("max_output_tokens must be greater than zero");
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            bail!(
                "temperature must be within 0.0..=2.0, got {}",
                self.generation.temperature
            );
        }
        Ok(())
    }

    pub fn llm_enabled(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}
