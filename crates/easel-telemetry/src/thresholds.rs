// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Threshold lookup by exact name or name prefix.

/// Ceilings keyed by metric name or name prefix, kept in registration order.
///
/// Lookup for a metric name tries, in order:
/// 1. an entry whose key equals the name,
/// 2. the first registered entry whose key is a prefix of the name,
/// 3. nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdTable {
    entries: Vec<(String, f64)>,
}

impl ThresholdTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` for `key`.
    ///
    /// An existing key keeps its registration position and only gets its value replaced.
    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Removes the entry registered under exactly `key`.
    pub fn remove(&mut self, key: &str) -> Option<f64> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Resolves the ceiling that applies to `name`.
    pub fn resolve(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .or_else(|| self.entries.iter().find(|(key, _)| name.starts_with(key.as_str())))
            .map(|(_, value)| *value)
    }

    /// Iterates over the entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins_over_prefix() {
        let mut table = ThresholdTable::new();
        table.set("canvas", 100.0);
        table.set("canvas.render", 16.0);

        assert_eq!(table.resolve("canvas.render"), Some(16.0));
        assert_eq!(table.resolve("canvas.update"), Some(100.0));
    }

    #[test]
    fn first_registered_prefix_wins() {
        let mut table = ThresholdTable::new();
        table.set("canvas.", 50.0);
        table.set("canvas.render", 16.0);
        table.set("canvas.re", 8.0);

        // "canvas." was registered before "canvas.re".
        assert_eq!(table.resolve("canvas.resize"), Some(50.0));
    }

    #[test]
    fn unknown_name_has_no_threshold() {
        let mut table = ThresholdTable::new();
        table.set("canvas.render", 16.0);
        assert_eq!(table.resolve("memory.heap"), None);
        assert_eq!(table.resolve("canvas"), None);
    }

    #[test]
    fn re_registering_keeps_position() {
        let mut table = ThresholdTable::new();
        table.set("a", 1.0);
        table.set("ab", 2.0);
        table.set("a", 3.0);

        assert_eq!(table.iter().collect::<Vec<_>>(), vec![("a", 3.0), ("ab", 2.0)]);
        assert_eq!(table.resolve("abc"), Some(3.0));
    }

    #[test]
    fn remove_only_matches_exact_key() {
        let mut table = ThresholdTable::new();
        table.set("canvas.render", 16.0);
        assert_eq!(table.remove("canvas"), None);
        assert_eq!(table.remove("canvas.render"), Some(16.0));
        assert!(table.is_empty());
    }
}
