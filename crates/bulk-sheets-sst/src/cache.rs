//! Recency cache of interned entries

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::entry::EntryRef;

/// Fixed-capacity LRU map from entry to string-table index.
///
/// Text and single characters are kept in separate LRU lists so lookups
/// can borrow (`&str` / `u16`) without allocating a key.
#[derive(Debug)]
pub struct RecencyCache {
    text: LruCache<String, i32>,
    chars: LruCache<u16, i32>,
    hits: u64,
}

impl RecencyCache {
    /// Create a cache holding up to `capacity` entries of each kind
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            text: LruCache::new(cap),
            chars: LruCache::new(cap),
            hits: 0,
        }
    }

    /// Look up `key`, refreshing its recency on a hit
    pub fn get(&mut self, key: EntryRef<'_>) -> Option<i32> {
        let found = match key {
            EntryRef::Text(s) => self.text.get(s).copied(),
            EntryRef::Char(c) => self.chars.get(&c).copied(),
            EntryRef::Null => None,
        };
        if found.is_some() {
            self.hits += 1;
        }
        found
    }

    /// Insert or refresh `key`, evicting the least recently used entry when full
    pub fn put(&mut self, key: EntryRef<'_>, index: i32) {
        match key {
            EntryRef::Text(s) => {
                if let Some(slot) = self.text.get_mut(s) {
                    *slot = index;
                } else {
                    self.text.put(s.to_string(), index);
                }
            }
            EntryRef::Char(c) => {
                self.chars.put(c, index);
            }
            EntryRef::Null => {}
        }
    }

    /// Keys currently resident, most recent first within each kind
    pub fn resident_keys(&self) -> impl Iterator<Item = EntryRef<'_>> {
        self.text
            .iter()
            .map(|(k, _)| EntryRef::Text(k.as_str()))
            .chain(self.chars.iter().map(|(c, _)| EntryRef::Char(*c)))
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.text.len() + self.chars.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits
    }
}
