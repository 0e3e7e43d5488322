use std::time::Duration;

use chrono::{DateTime, Utc};
use design_eval::cache::ResultCache;
use design_eval::design::{FrameMetrics, extract_frames};
use design_eval::evaluate::cache_key;
use tempfile::TempDir;

use crate::fixtures::onboarding_document;

fn at(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000 + seconds, 0).unwrap()
}

#[test]
fn frames_read_back_identically_before_expiry() {
    let tmp = TempDir::new().unwrap();
    let cache = ResultCache::new(tmp.path(), Duration::from_secs(3600));
    let frames = extract_frames(&onboarding_document(), None);

    cache.put_at("FILE123", &frames, at(0)).unwrap();
    let restored: Vec<FrameMetrics> = cache.get_at("FILE123", at(3599)).unwrap();
    assert_eq!(restored, frames);
}

#[test]
fn frames_expire_after_ttl() {
    let tmp = TempDir::new().unwrap();
    let cache = ResultCache::new(tmp.path(), Duration::from_secs(3600));
    let frames = extract_frames(&onboarding_document(), None);

    cache.put_at("FILE123", &frames, at(0)).unwrap();
    assert!(cache.get_at::<Vec<FrameMetrics>>("FILE123", at(3600)).is_none());
    assert_eq!(cache.entries(at(3600)).unwrap().len(), 1);
}

#[test]
fn each_identifier_and_filter_pair_has_its_own_entry() {
    let tmp = TempDir::new().unwrap();
    let cache = ResultCache::new(tmp.path(), Duration::from_secs(3600));
    let all = extract_frames(&onboarding_document(), None);
    let filtered = extract_frames(&onboarding_document(), Some("Onboarding"));

    cache.put_at(&cache_key("FILE123", None), &all, at(0)).unwrap();
    cache.put_at(&cache_key("FILE123", Some("Flow 1")), &filtered, at(0)).unwrap();

    let restored: Vec<FrameMetrics> = cache.get_at(&cache_key("FILE123", None), at(1)).unwrap();
    assert_eq!(restored, all);
    assert!(
        cache
            .get_at::<Vec<FrameMetrics>>(&cache_key("FILE123", Some("Flow_1")), at(1))
            .is_none()
    );
    assert!(
        cache
            .get_at::<Vec<FrameMetrics>>(&cache_key("FILE123", Some("Flow/1")), at(1))
            .is_none()
    );
    assert_eq!(cache.entries(at(1)).unwrap().len(), 2);
}
