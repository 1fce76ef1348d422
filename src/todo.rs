use crate::ids::IdGenerator;
use crate::models::TodoRecord;

/// Home-screen checklist. Lives in memory only.
#[derive(Debug, Default)]
pub struct TodoList {
    items: Vec<TodoRecord>,
    ids: IdGenerator,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items not yet ticked off.
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|t| !t.done).count()
    }

    /// Append a trimmed todo. Blank input leaves the list untouched.
    pub fn add_todo(&mut self, text: &str) -> Option<TodoRecord> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let record = TodoRecord {
            id: self.ids.next_id(),
            text: text.to_string(),
            done: false,
        };
        self.items.push(record.clone());
        Some(record)
    }

    pub fn toggle_todo(&mut self, id: u64) {
        if let Some(item) = self.items.iter_mut().find(|t| t.id == id) {
            item.done = !item.done;
        }
    }

    pub fn delete_todo(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_ignored_and_text_is_trimmed() {
        let mut todos = TodoList::new();
        assert!(todos.add_todo("").is_none());
        assert!(todos.add_todo("   ").is_none());
        assert!(todos.is_empty());

        let added = todos.add_todo("  wash bowl  ").unwrap();
        assert_eq!(added.text, "wash bowl");
        assert!(!added.done);
        assert_eq!(todos.items(), &[added]);
    }

    #[test]
    fn toggle_flips_only_done() {
        let mut todos = TodoList::new();
        let item = todos.add_todo("feed cat").unwrap();
        todos.toggle_todo(item.id);
        assert!(todos.items()[0].done);
        assert_eq!(todos.items()[0].text, "feed cat");
        assert_eq!(todos.items()[0].id, item.id);
        assert_eq!(todos.remaining(), 0);

        todos.toggle_todo(item.id);
        assert!(!todos.items()[0].done);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut todos = TodoList::new();
        todos.add_todo("a");
        todos.toggle_todo(1);
        todos.delete_todo(1);
        assert_eq!(todos.len(), 1);
        assert!(!todos.items()[0].done);
    }

    #[test]
    fn delete_removes_matching_item() {
        let mut todos = TodoList::new();
        let a = todos.add_todo("a").unwrap();
        let b = todos.add_todo("b").unwrap();
        assert!(a.id < b.id);
        todos.delete_todo(a.id);
        assert_eq!(todos.items(), &[b]);
    }
}
