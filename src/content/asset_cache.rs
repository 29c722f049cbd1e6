use std::sync::{Arc, Weak};

use dashmap::DashMap;
use log::trace;

/// A path keyed cache of weak references, so the cache itself never keeps an asset alive.
pub struct AssetCache<T> {
    ref_cache: DashMap<String, Weak<T>>,
}

impl<T> AssetCache<T> {
    pub fn new() -> Self {
        Self {
            ref_cache: DashMap::with_capacity(100),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        self.ref_cache.get(name).and_then(|weak| weak.upgrade())
    }

    pub fn insert(&self, name: impl Into<String>, asset: &Arc<T>) {
        self.ref_cache.insert(name.into(), Arc::downgrade(asset));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the live asset for `name` or calls `load` and remembers its result. Failed loads
    /// are not remembered, the next call tries again.
    pub fn get_or_try_load<E, F>(&self, name: &str, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce(&str) -> Result<T, E>,
    {
        if let Some(arc) = self.get(name) {
            trace!("Content cache hit for {}", name);
            return Ok(arc);
        }

        let arc = Arc::new(load(name)?);
        self.insert(name, &arc);
        Ok(arc)
    }

    pub fn len(&self) -> usize {
        self.ref_cache
            .iter()
            .filter(|entry| entry.value().strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sweep(&self) {
        self.ref_cache.retain(|_, weak| weak.strong_count() > 0);
    }
}

impl<T> Default for AssetCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::AssetCache;
    use std::sync::Arc;

    #[test]
    fn only_weak_references_are_kept() {
        let cache = AssetCache::<String>::new();
        let asset = Arc::new("oak".to_string());
        cache.insert("trees/oak.obj", &asset);
        assert_eq!(cache.get("trees/oak.obj").as_deref(), Some(&"oak".to_string()));
        assert_eq!(cache.len(), 1);

        drop(asset);
        assert!(cache.get("trees/oak.obj").is_none());
        cache.sweep();
        assert!(cache.is_empty());
    }

    #[test]
    fn loads_once_while_alive() -> Result<(), anyhow::Error> {
        let cache = AssetCache::<u32>::new();
        let mut calls = 0;
        let first = cache.get_or_try_load("a", |_| {
            calls += 1;
            Ok::<_, anyhow::Error>(7)
        })?;
        let second = cache.get_or_try_load("a", |_| {
            calls += 1;
            Ok::<_, anyhow::Error>(8)
        })?;
        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));

        let failed = cache.get_or_try_load("b", |_| Err(anyhow::anyhow!("missing")));
        assert!(failed.is_err());
        assert!(!cache.contains("b"));
        Ok(())
    }
}
