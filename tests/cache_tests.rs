//! Response cache TTL behavior.

use std::time::Duration;
use wattson::infrastructure::storage::cache::ResponseCache;

#[test]
fn fresh_entries_are_returned() {
    let cache = ResponseCache::new(Duration::from_secs(60));
    cache.insert("key".to_string(), "three insights".to_string());

    assert_eq!(cache.get("key").as_deref(), Some("three insights"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn stale_entries_are_treated_as_absent() {
    let cache = ResponseCache::new(Duration::from_millis(40));
    cache.insert("key".to_string(), "old".to_string());

    std::thread::sleep(Duration::from_millis(80));

    assert_eq!(cache.get("key"), None);
    // The entry is only superseded on the next store
    assert_eq!(cache.len(), 1);

    cache.insert("key".to_string(), "new".to_string());
    assert_eq!(cache.get("key").as_deref(), Some("new"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn unknown_keys_miss() {
    let cache = ResponseCache::new(Duration::from_secs(60));
    assert_eq!(cache.get("nope"), None);
    assert!(cache.is_empty());
}

#[test]
fn clear_empties_the_map() {
    let cache = ResponseCache::new(Duration::from_secs(60));
    cache.insert("a".to_string(), "1".to_string());
    cache.insert("b".to_string(), "2".to_string());
    cache.clear();
    assert!(cache.is_empty());
}
