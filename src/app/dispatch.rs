use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::cache::ResultCache;
use crate::cli::{CacheCommands, Cli, Commands};
use crate::config::Config;
use crate::design::{DesignProfile, FrameMetrics};
use crate::evaluate::comments::post_evaluation_comments;
use crate::evaluate::store::{load_json, save_json};
use crate::evaluate::{Evaluator, report};
use crate::providers::{AnthropicComparator, FigmaClient};

pub fn figma_client(config: &Config) -> FigmaClient {
    FigmaClient::with_base_url(config.figma_token.as_deref(), Some(&config.figma.api_base))
        .with_timeout(config.figma.request_timeout_secs)
        .with_pre_fetch_delay(config.figma.pre_fetch_delay())
}

pub fn comparator(config: &Config) -> AnthropicComparator {
    let settings = &config.comparator;
    AnthropicComparator::with_base_url(settings.api_key.as_deref(), settings.base_url.as_deref())
        .with_model(settings.model.clone())
        .with_max_tokens(settings.max_tokens)
        .with_temperature(settings.temperature)
}

pub fn result_cache(config: &Config) -> ResultCache {
    ResultCache::new(config.cache_dir(), config.cache.ttl())
}

pub fn evaluator(config: &Config, figma: Arc<FigmaClient>) -> Evaluator {
    let evaluator = Evaluator::new(figma, Arc::new(comparator(config)))
        .with_policy(config.scoring.clone())
        .with_thresholds(config.profile);
    if config.cache.enabled {
        evaluator.with_cache(result_cache(config))
    } else {
        evaluator
    }
}

async fn run_extract(
    config: &Config,
    file_key: &str,
    prefix: Option<&str>,
    use_cache: bool,
    out: &Path,
) -> Result<()> {
    let figma = Arc::new(figma_client(config));
    let frames = evaluator(config, figma)
        .extract(file_key, prefix, use_cache)
        .await?;

    if frames.is_empty() {
        println!("No frames with text content found in {file_key}.");
        return Ok(());
    }

    save_json(out, &frames).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Extracted {} frames -> {}", frames.len(), out.display());
    for frame in &frames {
        println!(
            "  {}: {} words, {} buttons",
            frame.name, frame.total_words, frame.button_count
        );
    }
    Ok(())
}

fn run_profile(config: &Config, frames_path: &Path, out: &Path) -> Result<DesignProfile> {
    let frames: Vec<FrameMetrics> = load_json(frames_path).with_context(|| {
        format!(
            "Frames file {} missing or invalid; run `design-eval extract` first",
            frames_path.display()
        )
    })?;
    let profile = crate::design::aggregate_with(&frames, &config.profile)?;
    save_json(out, &profile).with_context(|| format!("Failed to write {}", out.display()))?;

    info!(frames = profile.frame_count(), path = %out.display(), "profile written");
    println!(
        "Profile of {} frames -> {}",
        profile.frame_count(),
        out.display()
    );
    println!(
        "  avg words {:.1}, avg buttons {:.1}, cognitive load {}",
        profile.mean_words(),
        profile.interaction_metrics.avg_buttons_per_screen,
        profile.cognitive_load()
    );
    Ok(profile)
}

async fn run_evaluate(
    config: &Config,
    file_key: &str,
    reference_path: &Path,
    prefix: Option<&str>,
    use_cache: bool,
    post_comments: bool,
) -> Result<()> {
    let reference: DesignProfile = load_json(reference_path).with_context(|| {
        format!(
            "Reference profile {} missing or invalid; run `design-eval extract` and `design-eval profile` first",
            reference_path.display()
        )
    })?;
    info!(frames = reference.frame_count(), "reference profile loaded");

    let figma = Arc::new(figma_client(config));
    let result = evaluator(config, Arc::clone(&figma))
        .evaluate(&reference, file_key, prefix, use_cache)
        .await?;

    println!("{}", report::render(&result));

    let out = config.evaluation_output_path(file_key);
    save_json(&out, &result).with_context(|| format!("Failed to write {}", out.display()))?;
    println!("Results saved to {}", out.display());

    if post_comments {
        let posted = post_evaluation_comments(&figma, &result).await;
        println!("{posted} comments posted");
    }
    Ok(())
}

fn run_cache(config: &Config, command: CacheCommands) -> Result<()> {
    let cache = result_cache(config);
    match command {
        CacheCommands::List => {
            let entries = cache.entries(Utc::now())?;
            if entries.is_empty() {
                println!("Cache is empty ({})", cache.dir().display());
            }
            for entry in entries {
                let state = if entry.fresh { "fresh" } else { "expired" };
                println!(
                    "{}  {}  {state}",
                    entry.written_at.format("%Y-%m-%d %H:%M:%S"),
                    entry.key
                );
            }
        }
        CacheCommands::Clear { key: Some(key) } => {
            if cache.clear(&key)? {
                println!("Removed cache entry {key}");
            } else {
                println!("No cache entry for {key}");
            }
        }
        CacheCommands::Clear { key: None } => {
            let removed = cache.clear_all()?;
            println!("Removed {removed} cache entries");
        }
    }
    Ok(())
}

fn or_default(path: Option<PathBuf>, default: &Path) -> PathBuf {
    path.unwrap_or_else(|| default.to_path_buf())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Extract {
            file_key,
            prefix,
            no_cache,
            out,
        } => {
            let out = or_default(out, &config.paths.extracted_frames);
            run_extract(&config, &file_key, prefix.as_deref(), !no_cache, &out).await
        }
        Commands::Profile { frames, out } => {
            let frames = or_default(frames, &config.paths.extracted_frames);
            let out = or_default(out, &config.paths.reference_profile);
            run_profile(&config, &frames, &out).map(|_| ())
        }
        Commands::Evaluate {
            file_key,
            reference,
            prefix,
            no_cache,
            post_comments,
        } => {
            let reference = or_default(reference, &config.paths.reference_profile);
            run_evaluate(
                &config,
                &file_key,
                &reference,
                prefix.as_deref(),
                !no_cache,
                post_comments,
            )
            .await
        }
        Commands::Cache { cache_command } => run_cache(&config, cache_command),
    }
}
