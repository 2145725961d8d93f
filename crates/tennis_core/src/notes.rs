//! Narrative notes kept about each competitor.
//!
//! The bracket records a line of text after every match and recalls the
//! latest few when a competitor plans its next one. How notes are stored
//! or ranked is up to the store.

use std::collections::HashMap;

use crate::error::NotesError;

/// Key-to-text-list store consulted for strategy context.
pub trait NotesStore: Send {
    /// Append a note about `competitor`.
    fn record(&mut self, competitor: &str, text: &str) -> Result<(), NotesError>;

    /// Up to `limit` notes about `competitor`, most relevant first.
    fn recall(&self, competitor: &str, limit: usize) -> Result<Vec<String>, NotesError>;

    /// Forget notes about one competitor, or everyone when `None`.
    fn clear(&mut self, competitor: Option<&str>) -> Result<(), NotesError>;
}

/// Notes held in memory for the duration of a run; recall is newest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotes {
    notes: HashMap<String, Vec<String>>,
}

impl InMemoryNotes {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NotesStore for InMemoryNotes {
    fn record(&mut self, competitor: &str, text: &str) -> Result<(), NotesError> {
        self.notes
            .entry(competitor.to_string())
            .or_default()
            .push(text.to_string());
        Ok(())
    }

    fn recall(&self, competitor: &str, limit: usize) -> Result<Vec<String>, NotesError> {
        Ok(self
            .notes
            .get(competitor)
            .map(|notes| notes.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn clear(&mut self, competitor: Option<&str>) -> Result<(), NotesError> {
        match competitor {
            Some(name) => {
                self.notes.remove(name);
            }
            None => self.notes.clear(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recall_newest_first_and_capped() {
        let mut store = InMemoryNotes::new();
        for round in 1..=5 {
            store
                .record("Djokovic", &format!("Won in round {}", round))
                .unwrap();
        }

        let recalled = store.recall("Djokovic", 3).unwrap();
        assert_eq!(
            recalled,
            vec!["Won in round 5", "Won in round 4", "Won in round 3"]
        );
        assert!(store.recall("Nadal", 3).unwrap().is_empty());
    }

    #[test]
    fn test_clear_one_or_all() {
        let mut store = InMemoryNotes::new();
        store.record("Murray", "Lost to Djokovic").unwrap();
        store.record("Djokovic", "Won against Murray").unwrap();

        store.clear(Some("Murray")).unwrap();
        assert!(store.recall("Murray", 3).unwrap().is_empty());
        assert_eq!(store.recall("Djokovic", 3).unwrap().len(), 1);

        store.clear(None).unwrap();
        assert!(store.recall("Djokovic", 3).unwrap().is_empty());
    }
}
