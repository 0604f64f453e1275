use std::collections::HashMap;
use std::hash::Hash;

/// Map of values that keeps the mean of its current entries up to date on
/// every insert, overwrite and removal.
#[derive(Clone, Debug)]
pub struct RunningAverage<K> {
    values: HashMap<K, f64>,
    total: f64,
}

impl<K> Default for RunningAverage<K> {
    fn default() -> Self {
        RunningAverage { values: HashMap::new(), total: 0.0 }
    }
}

impl<K> RunningAverage<K> where K: Hash + Eq {
    pub fn new() -> RunningAverage<K> {
        RunningAverage::default()
    }

    /// Inserts or overwrites `key`. An overwritten value stops counting toward the mean.
    pub fn set(&mut self, key: K, value: f64) {
        if let Some(old) = self.values.insert(key, value) {
            self.total -= old;
        }
        self.total += value;
    }

    pub fn remove(&mut self, key: &K) -> Option<f64> {
        let old = self.values.remove(key)?;
        self.total -= old;
        if self.values.is_empty() {
            self.total = 0.0;
        }
        Some(old)
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// `None` while there are no entries.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.total / self.values.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &f64)> {
        self.values.iter()
    }
}
