use ahash::AHashMap;

/// A two-way map between raw string keys and dense `u32` indices.
/// Indices are handed out in first-seen order, starting at 0, so the
/// index space is always contiguous.
#[derive(Debug, Default, Clone)]
pub struct DenseMap {
    original_to_dense: AHashMap<String, u32>,
    dense_to_original: Vec<String>,
}

impl DenseMap {
    /// Creates an empty `DenseMap`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of `key`, assigning the next free index if the key
    /// has not been seen before.
    ///
    /// # Arguments
    ///
    /// * `key` - The raw key to look up or insert.
    pub fn get_or_insert(&mut self, key: &str) -> u32 {
        if let Some(&dense) = self.original_to_dense.get(key) {
            return dense;
        }
        let dense = self.dense_to_original.len() as u32;
        self.original_to_dense.insert(key.to_string(), dense);
        self.dense_to_original.push(key.to_string());
        dense
    }

    /// Retrieves the dense index for `key`, if present.
    #[inline(always)]
    pub fn get(&self, key: &str) -> Option<u32> {
        self.original_to_dense.get(key).copied()
    }

    /// Retrieves the raw key that was assigned `dense`, if any.
    #[inline(always)]
    pub fn original(&self, dense: u32) -> Option<&str> {
        self.dense_to_original.get(dense as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dense_to_original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense_to_original.is_empty()
    }

    /// Iterates `(index, raw key)` pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.dense_to_original
            .iter()
            .enumerate()
            .map(|(index, key)| (index as u32, key.as_str()))
    }
}

impl<S: AsRef<str>> FromIterator<S> for DenseMap {
    /// Builds a `DenseMap` by inserting keys in iteration order.
    /// Repeated keys keep the index of their first occurrence.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut map = DenseMap::new();
        for key in iter {
            map.get_or_insert(key.as_ref());
        }
        map
    }
}
