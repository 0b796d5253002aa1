use tracing::trace;

use crate::task::{self, Toggled};

/// Ordered list of task display strings.
///
/// Position is identity: entries are addressed by index and duplicates
/// are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    entries: Vec<String>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn push(&mut self, entry: String) {
        trace!(index = self.entries.len(), "push entry");
        self.entries.push(entry);
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        if index >= self.entries.len() {
            return None;
        }
        Some(self.entries.remove(index))
    }

    /// Flips the completion marker in place; the entry keeps its index.
    pub fn toggle(&mut self, index: usize) -> Option<Toggled> {
        let slot = self.entries.get_mut(index)?;
        let toggled = task::toggle(slot);
        slot.clone_from(&toggled.entry);
        Some(toggled)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn replace_all(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }
}

#[cfg(test)]
mod tests {
    use super::TaskList;

    fn sample() -> TaskList {
        let mut list = TaskList::new();
        for entry in ["[08:00] a", "[08:01] b", "[08:02] c"] {
            list.push(entry.to_string());
        }
        list
    }

    #[test]
    fn remove_keeps_order_of_others() {
        let mut list = sample();
        assert_eq!(list.remove(1).as_deref(), Some("[08:01] b"));
        assert_eq!(
            list.iter().collect::<Vec<_>>(),
            vec!["[08:00] a", "[08:02] c"]
        );
    }

    #[test]
    fn out_of_range_is_none() {
        let mut list = sample();
        assert_eq!(list.remove(3), None);
        assert_eq!(list.toggle(7), None);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn toggle_preserves_position() {
        let mut list = sample();
        let toggled = list.toggle(2).expect("entry exists");
        assert!(toggled.completed);
        assert_eq!(list.get(2), Some("✓ [08:02] c"));
        assert_eq!(list.get(0), Some("[08:00] a"));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut list = TaskList::new();
        list.push("x".to_string());
        list.push("x".to_string());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn replace_all_and_clear() {
        let mut list = sample();
        list.replace_all(vec!["only".to_string()]);
        assert_eq!(list.as_slice(), &["only".to_string()]);
        list.clear();
        assert!(list.is_empty());
    }
}
