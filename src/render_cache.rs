use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

/// Cache for fully rendered pages, keyed by route. Purely an optimization:
/// entries expire so that content edits on disk show up without a restart.
/// A non-caching instance keeps the call sites identical when the cache is
/// disabled in config.
pub struct RenderCache {
    entries: Option<HashMap<String, CacheEntry>>,
}

pub enum Expire {
    Never,
    After(Duration),
}

struct CacheEntry {
    expires_at: DateTime<Utc>,
    value: Arc<String>,
}

impl RenderCache {
    pub fn new() -> Self {
        RenderCache { entries: Some(HashMap::new()) }
    }

    pub fn non_caching() -> Self {
        RenderCache { entries: None }
    }

    pub fn get(&mut self, key: &str) -> Option<Arc<String>> {
        let entries = self.entries.as_mut()?;
        if let Some(entry) = entries.get(key) {
            if Utc::now() <= entry.expires_at {
                return Some(entry.value.clone());
            }
        } else {
            return None;
        }

        // Expired entries are removed on lookup so the map does not grow
        // with keys that will never hit again.
        entries.remove(key);
        None
    }

    pub fn put(&mut self, key: &str, rendered: String, expire: Expire) -> Arc<String> {
        let value = Arc::new(rendered);

        if let Some(ref mut entries) = self.entries {
            let expires_at = match expire {
                Expire::Never => DateTime::<Utc>::MAX_UTC,
                Expire::After(duration) => Utc::now() + duration,
            };
            entries.insert(key.to_string(), CacheEntry {
                expires_at,
                value: value.clone(),
            });
        }

        value
    }

    /// Cache-aside helper: returns the cached page or renders and stores it.
    pub fn get_or_render<F>(&mut self, key: &str, expire: Expire, render: F) -> std::io::Result<Arc<String>>
    where
        F: FnOnce() -> std::io::Result<String>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }
        let rendered = render()?;
        Ok(self.put(key, rendered, expire))
    }
}
