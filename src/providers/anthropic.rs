use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::comparison::{SYSTEM_PROMPT, build_user_message, parse_comparison};
use super::http_client::build_client_with_timeout;
use super::scrub::{describe_failure, scrub_secret_patterns};
use super::traits::{BoxFuture, Comparator, Comparison};
use crate::design::DesignProfile;
use crate::error::{EvalError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicComparator {
    api_key: Option<String>,
    messages_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    content: Vec<ResponseContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Unsupported,
}

impl AnthropicComparator {
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_base_url(api_key, None)
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: Option<&str>) -> Self {
        let base = base_url.map_or(DEFAULT_BASE_URL, |u| u.trim_end_matches('/'));
        Self {
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToString::to_string),
            messages_url: format!("{base}/v1/messages"),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.0,
            client: build_client_with_timeout(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.client = build_client_with_timeout(timeout_secs);
        self
    }

    async fn ask(&self, reference: &DesignProfile, candidate: &DesignProfile) -> Result<Comparison> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            EvalError::Comparator("Anthropic API key not set. Set ANTHROPIC_API_KEY.".into())
        })?;

        let user_message =
            build_user_message(reference, candidate).map_err(|e| EvalError::Comparator(e.to_string()))?;
        let request = ChatRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: user_message,
            }],
            temperature: self.temperature,
        };

        info!(model = %self.model, "requesting qualitative comparison");
        let response = self
            .client
            .post(&self.messages_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| EvalError::Comparator(scrub_secret_patterns(&e.to_string()).into_owned()))?;

        if !response.status().is_success() {
            return Err(EvalError::Comparator(describe_failure(response).await));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| EvalError::Comparator(format!("malformed response: {e}")))?;

        let text: String = body
            .content
            .into_iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text),
                ResponseContentBlock::Unsupported => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        debug!(chars = text.len(), "comparator replied");

        parse_comparison(&text).map_err(|e| EvalError::Comparator(format!("{e:#}")))
    }
}

impl Comparator for AnthropicComparator {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn compare<'a>(
        &'a self,
        reference: &'a DesignProfile,
        candidate: &'a DesignProfile,
    ) -> BoxFuture<'a, Result<Comparison>> {
        Box::pin(self.ask(reference, candidate))
    }
}
