use std::path::PathBuf;

use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("FIGMA_TOKEN")
            && !token.is_empty()
        {
            self.figma_token = Some(token);
        }

        if let Ok(key) = std::env::var("ANTHROPIC_API_KEY")
            && !key.is_empty()
        {
            self.comparator.api_key = Some(key);
        }

        if let Ok(model) = std::env::var("DESIGN_EVAL_MODEL")
            && !model.is_empty()
        {
            self.comparator.model = model;
        }

        if let Ok(dir) = std::env::var("DESIGN_EVAL_CACHE_DIR")
            && !dir.is_empty()
        {
            self.cache.dir = Some(PathBuf::from(dir));
        }

        if let Ok(ttl_str) = std::env::var("DESIGN_EVAL_CACHE_TTL_SECS")
            && let Ok(ttl) = ttl_str.parse::<u64>()
            && ttl > 0
        {
            self.cache.ttl_secs = ttl;
        }

        if let Ok(path) = std::env::var("DESIGN_EVAL_REFERENCE_PROFILE")
            && !path.is_empty()
        {
            self.paths.reference_profile = PathBuf::from(path);
        }
    }
}
