use super::PromptCategory;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// A reusable reflective question shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub id: Uuid,
    pub text: String,
    pub category: PromptCategory,
    /// Explicit date override. Persisted but not consulted by the daily rotation.
    pub scheduled_date: Option<NaiveDate>,
    /// When the prompt was last presented and the user started writing.
    pub last_used_at: Option<DateTime<Utc>>,
}

impl Prompt {
    /// Creates a never-used prompt with a fresh id.
    pub fn new(text: impl Into<String>, category: PromptCategory) -> Self {
        Prompt {
            id: Uuid::new_v4(),
            text: text.into(),
            category,
            scheduled_date: None,
            last_used_at: None,
        }
    }
}
