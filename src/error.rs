use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `design-eval`.
///
/// Callers match on these to tell "the design had no content" apart from
/// "the remote service failed"; the binary layer continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum EvalError {
    // ── Document source ──────────────────────────────────────────────────
    #[error("could not fetch design {file_key}: {message}")]
    UpstreamFetch { file_key: String, message: String },

    // ── Aggregation ──────────────────────────────────────────────────────
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    // ── Qualitative comparator ───────────────────────────────────────────
    #[error("comparator failed: {0}")]
    Comparator(String),

    // ── Local files ──────────────────────────────────────────────────────
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EvalError {
    pub fn upstream(file_key: &str, message: impl Into<String>) -> Self {
        Self::UpstreamFetch {
            file_key: file_key.to_string(),
            message: message.into(),
        }
    }

    /// `true` when the failure means "nothing to analyze" rather than a broken run.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, EvalError>;
