use crate::models::{JournalEntry, Mood, PromptCategory};

/// Criteria for browsing the journal.
///
/// The search text matches entry content or prompt text, case-insensitively.
/// Set criteria must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub search_text: Option<String>,
    pub category: Option<PromptCategory>,
    pub mood: Option<Mood>,
}

impl EntryFilter {
    /// Filter on search text only.
    pub fn search(text: impl Into<String>) -> Self {
        EntryFilter {
            search_text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: PromptCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Lowercased search text, or `None` when blank.
    fn needle(&self) -> Option<String> {
        self.search_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether any criterion would narrow the list.
    pub fn is_active(&self) -> bool {
        self.needle().is_some() || self.category.is_some() || self.mood.is_some()
    }

    /// Resets every criterion.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, entry: &JournalEntry) -> bool {
        if let Some(needle) = self.needle() {
            if !entry.mentions(&needle) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if entry.prompt.as_ref().map(|prompt| prompt.category) != Some(category) {
                return false;
            }
        }

        if let Some(mood) = self.mood {
            if entry.mood != Some(mood) {
                return false;
            }
        }

        true
    }
}

/// Keeps the entries matching `filter`, preserving their order.
pub fn filter_entries(entries: Vec<JournalEntry>, filter: &EntryFilter) -> Vec<JournalEntry> {
    if !filter.is_active() {
        return entries;
    }
    entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Prompt;
    use chrono::Utc;

    fn entry(content: &str, prompt: Option<(&str, PromptCategory)>, mood: Option<Mood>) -> JournalEntry {
        let mut entry = JournalEntry::new(
            Utc::now(),
            prompt.map(|(text, category)| Prompt::new(text, category)),
        );
        entry.content = content.to_string();
        entry.mood = mood;
        entry
    }

    #[test]
    fn test_search_matches_content_case_insensitively() {
        let filter = EntryFilter::search("family");
        assert!(filter.matches(&entry("Dinner with my Family", None, None)));
        assert!(!filter.matches(&entry("Dinner with friends", None, None)));
    }

    #[test]
    fn test_search_matches_prompt_text() {
        let filter = EntryFilter::search("family");
        let linked = entry(
            "We cooked together",
            Some(("What does your family mean to you?", PromptCategory::Relationships)),
            None,
        );
        assert!(filter.matches(&linked));
    }

    #[test]
    fn test_blank_search_is_inactive() {
        assert!(!EntryFilter::search("").is_active());
        assert!(!EntryFilter::search("   ").is_active());
        assert!(EntryFilter::search(" walk ").matches(&entry("Evening walk", None, None)));
    }

    #[test]
    fn test_category_requires_linked_prompt() {
        let filter = EntryFilter::default().with_category(PromptCategory::Goals);
        assert!(filter.matches(&entry("", Some(("Next step?", PromptCategory::Goals)), None)));
        assert!(!filter.matches(&entry("", Some(("Calm?", PromptCategory::Mindfulness)), None)));
        assert!(!filter.matches(&entry("", None, None)));
    }

    #[test]
    fn test_criteria_combine_with_and() {
        let filter = EntryFilter::search("run")
            .with_category(PromptCategory::Growth)
            .with_mood(Mood::Happy);

        let all = entry("First 10k run", Some(("Growth?", PromptCategory::Growth)), Some(Mood::Happy));
        let wrong_mood = entry("First 10k run", Some(("Growth?", PromptCategory::Growth)), Some(Mood::Sad));
        let no_text = entry("Rest day", Some(("Growth?", PromptCategory::Growth)), Some(Mood::Happy));

        assert!(filter.matches(&all));
        assert!(!filter.matches(&wrong_mood));
        assert!(!filter.matches(&no_text));
    }

    #[test]
    fn test_filter_entries_preserves_order() {
        let entries = vec![
            entry("b happy", None, Some(Mood::Happy)),
            entry("a sad", None, Some(Mood::Sad)),
            entry("c happy", None, Some(Mood::Happy)),
        ];

        let kept = filter_entries(entries, &EntryFilter::default().with_mood(Mood::Happy));
        let contents: Vec<&str> = kept.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["b happy", "c happy"]);
    }

    #[test]
    fn test_clear() {
        let mut filter = EntryFilter::search("x").with_mood(Mood::Neutral);
        assert!(filter.is_active());
        filter.clear();
        assert!(!filter.is_active());
        assert_eq!(filter, EntryFilter::default());
    }
}
