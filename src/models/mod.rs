//! Domain types shared by the store, the services and the facade.

mod entry;
mod prompt;

pub use entry::JournalEntry;
pub use prompt::Prompt;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the user felt when writing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    VerySad,
}

impl Mood {
    /// Every mood, happiest first.
    pub const ALL: [Mood; 5] = [
        Mood::VeryHappy,
        Mood::Happy,
        Mood::Neutral,
        Mood::Sad,
        Mood::VerySad,
    ];

    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "veryHappy",
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::VerySad => "verySad",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "😄",
            Mood::Happy => "🙂",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::VerySad => "😢",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::VeryHappy => "Very happy",
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::VerySad => "Very sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == s)
            .ok_or_else(|| format!("Unknown mood: {}", s))
    }
}

/// Thematic tag on a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Gratitude,
    Reflection,
    Growth,
    Mindfulness,
    Relationships,
    Goals,
}

impl PromptCategory {
    pub const ALL: [PromptCategory; 6] = [
        PromptCategory::Gratitude,
        PromptCategory::Reflection,
        PromptCategory::Growth,
        PromptCategory::Mindfulness,
        PromptCategory::Relationships,
        PromptCategory::Goals,
    ];

    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptCategory::Gratitude => "gratitude",
            PromptCategory::Reflection => "reflection",
            PromptCategory::Growth => "growth",
            PromptCategory::Mindfulness => "mindfulness",
            PromptCategory::Relationships => "relationships",
            PromptCategory::Goals => "goals",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PromptCategory::Gratitude => "Gratitude",
            PromptCategory::Reflection => "Reflection",
            PromptCategory::Growth => "Growth",
            PromptCategory::Mindfulness => "Mindfulness",
            PromptCategory::Relationships => "Relationships",
            PromptCategory::Goals => "Goals",
        }
    }

    /// Decodes a stored category, falling back to `Reflection` for unknown values.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(PromptCategory::Reflection)
    }
}

impl fmt::Display for PromptCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown prompt category: {}", s))
    }
}
