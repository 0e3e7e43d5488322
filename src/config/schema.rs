use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::design::{LoadThresholds, ScoringPolicy};
use crate::error::ConfigError;
use crate::providers::anthropic::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Personal access token for the design service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figma_token: Option<String>,
    #[serde(default)]
    pub figma: FigmaConfig,
    #[serde(default)]
    pub comparator: ComparatorConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    /// Cognitive-load thresholds used when aggregating profiles.
    #[serde(default)]
    pub profile: LoadThresholds,
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigmaConfig {
    /// API base (default: <https://api.figma.com/v1>)
    #[serde(default = "default_figma_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Sleep before each document fetch (default: 2000)
    #[serde(default = "default_pre_fetch_delay_ms")]
    pub pre_fetch_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparatorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cache directory (default: `cache/` next to config.toml)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_reference_profile")]
    pub reference_profile: PathBuf,
    #[serde(default = "default_extracted_frames")]
    pub extracted_frames: PathBuf,
    /// Where evaluation results are written (default: current directory)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_figma_api_base() -> String {
    crate::providers::figma::DEFAULT_API_BASE.into()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_pre_fetch_delay_ms() -> u64 {
    2000
}

fn default_model() -> String {
    DEFAULT_MODEL.into()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_true() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_reference_profile() -> PathBuf {
    PathBuf::from("reference_profile.json")
}

fn default_extracted_frames() -> PathBuf {
    PathBuf::from("extracted_frames.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for FigmaConfig {
    fn default() -> Self {
        Self {
            api_base: default_figma_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            pre_fetch_delay_ms: default_pre_fetch_delay_ms(),
        }
    }
}

impl FigmaConfig {
    pub fn pre_fetch_delay(&self) -> Duration {
        Duration::from_millis(self.pre_fetch_delay_ms)
    }
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: 0.0,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            reference_profile: default_reference_profile(),
            extracted_frames: default_extracted_frames(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            figma_token: None,
            figma: FigmaConfig::default(),
            comparator: ComparatorConfig::default(),
            cache: CacheConfig::default(),
            profile: LoadThresholds::default(),
            scoring: ScoringPolicy::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Config {
    /// Resolved cache directory.
    pub fn cache_dir(&self) -> PathBuf {
        if let Some(dir) = &self.cache.dir {
            return dir.clone();
        }
        self.config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("cache"), |p| p.join("cache"))
    }

    /// `<output_dir>/evaluation_<first 8 chars of key>.json`
    pub fn evaluation_output_path(&self, file_key: &str) -> PathBuf {
        evaluation_output_path(&self.paths.output_dir, file_key)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let load = &self.profile;
        if !load.low_load_below.is_finite() || !load.high_load_from.is_finite() {
            return Err(ConfigError::Validation(
                "profile load thresholds must be finite".into(),
            ));
        }
        if load.low_load_below > load.high_load_from {
            return Err(ConfigError::Validation(format!(
                "profile.low_load_below ({}) must not exceed profile.high_load_from ({})",
                load.low_load_below, load.high_load_from
            )));
        }

        let policy = &self.scoring;
        for (name, ratio) in [
            ("excess_text_ratio", policy.excess_text_ratio),
            ("elevated_text_ratio", policy.elevated_text_ratio),
            ("sparse_text_ratio", policy.sparse_text_ratio),
        ] {
            if ratio.is_nan() || ratio <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "scoring.{name} must be positive, got {ratio}"
                )));
            }
        }
        for (name, amount) in [
            ("excess_text_penalty", policy.excess_text_penalty),
            ("elevated_text_penalty", policy.elevated_text_penalty),
            ("sparse_text_penalty", policy.sparse_text_penalty),
            ("inconsistent_buttons_penalty", policy.inconsistent_buttons_penalty),
            ("missing_progress_penalty", policy.missing_progress_penalty),
            ("high_severity_penalty", policy.high_severity_penalty),
            ("medium_severity_penalty", policy.medium_severity_penalty),
        ] {
            if amount.is_nan() || amount < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "scoring.{name} must not be negative, got {amount}"
                )));
            }
        }

        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Validation("cache.ttl_secs must be > 0".into()));
        }
        Ok(())
    }
}

pub fn evaluation_output_path(output_dir: &Path, file_key: &str) -> PathBuf {
    let short: String = file_key.chars().take(8).collect();
    output_dir.join(format!("evaluation_{short}.json"))
}
