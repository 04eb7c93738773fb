use std::collections::HashMap;
use std::hash::Hash;

/// Keyed collection with O(1) lookup that iterates in insertion order.
#[derive(Debug, Clone)]
pub(crate) struct Table<K, V> {
    rows: HashMap<K, V>,
    order: Vec<K>,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            rows: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert a row. Replacing an existing key keeps its original position
    /// and returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.rows.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }
        self.order.push(key.clone());
        self.rows.insert(key, value);
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.rows.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.rows.get_mut(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Rows in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.order.iter().filter_map(|key| self.rows.get(key))
    }
}

impl<K, V> Default for Table<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
