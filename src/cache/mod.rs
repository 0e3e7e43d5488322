//! Time-bounded on-disk cache, one JSON file per key.
//!
//! Expiry is checked lazily on read; nothing sweeps the directory. Writers
//! for the same key must be serialized by the caller.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct CacheRecord<T> {
    timestamp: DateTime<Utc>,
    file_key: String,
    data: T,
}

/// Summary of one stored entry, for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntryInfo {
    pub key: String,
    pub written_at: DateTime<Utc>,
    pub fresh: bool,
}

/// `true` while `now - written_at` is strictly below `ttl`.
pub fn is_fresh(written_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    let Ok(ttl) = TimeDelta::from_std(ttl) else {
        return true;
    };
    now.signed_duration_since(written_at) < ttl
}

#[derive(Debug, Clone)]
pub struct ResultCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_at(key, Utc::now())
    }

    /// Read `key` as of `now`. Missing, expired and unreadable entries are all
    /// a miss, as is a record stored under a different key; expired files are
    /// left in place.
    pub fn get_at<T: DeserializeOwned>(&self, key: &str, now: DateTime<Utc>) -> Option<T> {
        let path = self.path_for(key);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, error = %e, "cache entry unreadable, ignoring");
                return None;
            }
        };

        let record: CacheRecord<T> = match serde_json::from_str(&contents) {
            Ok(record) => record,
            Err(e) => {
                warn!(key, error = %e, "cache entry corrupt, ignoring");
                return None;
            }
        };

        if record.file_key != key {
            debug!(key, stored = %record.file_key, "cache entry belongs to another key");
            return None;
        }

        if is_fresh(record.timestamp, now, self.ttl) {
            let age_minutes = now.signed_duration_since(record.timestamp).num_minutes();
            info!(key, age_minutes, "using cached result");
            Some(record.data)
        } else {
            debug!(key, "cache entry expired");
            None
        }
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.put_at(key, value, Utc::now())
    }

    /// Write `value` under `key`, replacing any previous entry.
    pub fn put_at<T: Serialize>(&self, key: &str, value: &T, now: DateTime<Utc>) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create cache dir: {}", self.dir.display()))?;

        let record = CacheRecord {
            timestamp: now,
            file_key: key.to_string(),
            data: value,
        };
        let json = serde_json::to_string_pretty(&record).context("Failed to serialize cache entry")?;
        let path = self.path_for(key);
        fs::write(&path, json)
            .with_context(|| format!("Failed to write cache entry: {}", path.display()))?;

        debug!(key, "cache entry written");
        Ok(())
    }

    /// Remove one entry. Returns whether a file was removed.
    pub fn clear(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove cache entry: {}", path.display()))
            }
        }
    }

    /// Remove every entry. Returns how many files were removed.
    pub fn clear_all(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read cache dir: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove cache entry: {}", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Every parseable entry, sorted by key.
    pub fn entries(&self, now: DateTime<Utc>) -> Result<Vec<CacheEntryInfo>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read cache dir: {}", self.dir.display()))?
        {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Ok(contents) = fs::read_to_string(&path) else {
                continue;
            };
            let Ok(record) = serde_json::from_str::<CacheRecord<serde_json::Value>>(&contents)
            else {
                continue;
            };
            entries.push(CacheEntryInfo {
                fresh: is_fresh(record.timestamp, now, self.ttl),
                key: record.file_key,
                written_at: record.timestamp,
            });
        }
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

/// File name stem for `key`. ASCII letters, digits and `-` pass through;
/// every other byte becomes `_XX`, so distinct keys never share a file.
fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            let _ = write!(stem, "_{byte:02X}");
        }
    }
    stem
}
