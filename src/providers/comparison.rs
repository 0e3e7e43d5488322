use anyhow::{Context, Result};

use super::traits::Comparison;
use crate::design::DesignProfile;

pub const SYSTEM_PROMPT: &str = concat!(
    "You are a UX/UI design comparison assistant.\n\n",
    "IMPORTANT RULES:\n",
    "1. Do NOT judge designs in isolation.\n",
    "2. ONLY compare the candidate design against the reference design.\n",
    "3. Cite specific numeric differences.\n",
    "4. Explain the impact on the user experience.\n\n",
    "Respond ONLY with valid JSON in this format:\n",
    "{\n",
    "  \"deviations\": [\n",
    "    {\n",
    "      \"area\": \"specific metric name\",\n",
    "      \"reference_value\": \"exact reference value\",\n",
    "      \"candidate_value\": \"exact candidate value\",\n",
    "      \"impact\": \"short explanation of the UX impact\",\n",
    "      \"severity\": \"low|medium|high\"\n",
    "    }\n",
    "  ],\n",
    "  \"overall_assessment\": \"one-sentence assessment\",\n",
    "  \"comparison_confidence\": \"high|medium|low\"\n",
    "}\n\n",
    "If the profiles are too different to compare meaningfully, use \"comparison_confidence\": \"low\".",
);

pub fn build_user_message(reference: &DesignProfile, candidate: &DesignProfile) -> Result<String> {
    let reference = serde_json::to_string_pretty(reference).context("serialize reference")?;
    let candidate = serde_json::to_string_pretty(candidate).context("serialize candidate")?;
    Ok(format!(
        "Compare these two design profiles:\n\n\
         REFERENCE DESIGN (proven):\n{reference}\n\n\
         CANDIDATE DESIGN (to evaluate):\n{candidate}\n\n\
         Identify significant deviations that could affect the user experience."
    ))
}

/// Pull the JSON object out of a model reply that may be fenced or chatty.
pub fn extract_json(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        if let Some(end) = rest.find("```") {
            let candidate = rest[..end].trim();
            if !candidate.is_empty() {
                return Some(candidate);
            }
        }
    }

    if let Some(start) = text.find("```") {
        let rest = &text[start + "```".len()..];
        if let Some(end) = rest.find("```") {
            let candidate = rest[..end].trim();
            if candidate.starts_with('{') {
                return Some(candidate);
            }
        }
    }

    let open = text.find('{')?;
    let close = text.rfind('}')?;
    (close > open).then(|| &text[open..=close])
}

pub fn parse_comparison(text: &str) -> Result<Comparison> {
    let json = extract_json(text).context("reply contains no JSON object")?;
    serde_json::from_str(json).context("reply is not a valid comparison")
}
