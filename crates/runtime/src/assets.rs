//! Asset retention seam.
//!
//! The runtime never loads real assets; it only tells the presentation
//! layer which keys must stay resident. [`SpriteCache`] is the in-memory
//! reference-counting implementation used by default and in tests; front
//! ends can inject their own [`AssetStore`].

use std::collections::HashMap;
use std::sync::RwLock;

/// Keeps presentation-layer assets alive while combatants reference them.
pub trait AssetStore: Send + Sync {
    /// Marks `key` as in use, stacking with previous retains.
    fn retain(&self, key: &str);

    /// Drops one retain of `key`, evicting it at zero.
    ///
    /// Returns false when the key was not cached; callers log and move on.
    fn release(&self, key: &str) -> bool;

    fn is_cached(&self, key: &str) -> bool;
}

/// Reference-counting in-memory asset store.
pub struct SpriteCache {
    entries: RwLock<HashMap<String, usize>>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of distinct cached keys.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, usize>> {
        self.entries.read().expect("sprite cache lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, usize>> {
        self.entries.write().expect("sprite cache lock poisoned")
    }
}

impl Default for SpriteCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetStore for SpriteCache {
    fn retain(&self, key: &str) {
        *self.write().entry(key.to_owned()).or_insert(0) += 1;
    }

    fn release(&self, key: &str) -> bool {
        let mut entries = self.write();
        match entries.get_mut(key) {
            Some(count) => {
                *count -= 1;
                if *count == 0 {
                    entries.remove(key);
                }
                true
            }
            None => false,
        }
    }

    fn is_cached(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }
}
