use super::{Mood, Prompt};
use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

/// A user-authored journal record.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    /// Free text, empty until the first save.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub mood: Option<Mood>,
    /// The prompt that inspired the entry, cleared if that prompt is deleted.
    pub prompt: Option<Prompt>,
}

impl JournalEntry {
    /// Creates an empty entry stamped at `now`, truncated to the stored precision.
    pub fn new(now: DateTime<Utc>, prompt: Option<Prompt>) -> Self {
        let now = now.trunc_subsecs(6);
        JournalEntry {
            id: Uuid::new_v4(),
            content: String::new(),
            created_at: now,
            updated_at: now,
            mood: None,
            prompt,
        }
    }

    /// Whether the entry or its prompt mentions `needle` (already lowercased).
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.content.to_lowercase().contains(needle)
            || self
                .prompt
                .as_ref()
                .is_some_and(|prompt| prompt.text.to_lowercase().contains(needle))
    }
}
