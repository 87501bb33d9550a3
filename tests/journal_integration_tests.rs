//! Integration tests for browsing the journal: search, filters, grouping and streaks.

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use daybook::catalog::{PromptCatalog, PromptSeed};
use daybook::db::Database;
use daybook::ops::{JournalService, PromptService};
use daybook::{EntryFilter, Mood, Prompt, PromptCategory};
use tempfile::TempDir;

// Fixed reference time for deterministic tests: 2024-01-15 14:30 UTC
fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap()
}

struct Fixture {
    _temp_dir: TempDir,
    prompts: PromptService,
    journal: JournalService,
}

fn set_up() -> Fixture {
    let temp_dir = TempDir::new().expect("create temp dir");
    let db = Database::open(&temp_dir.path().join("daybook.db")).expect("open database");
    db.initialize_schema().expect("initialize schema");

    let prompts = PromptService::new(db.clone());
    prompts
        .seed_if_needed(&PromptCatalog {
            prompts: vec![
                PromptSeed {
                    text: "Who in your family made you laugh?".to_string(),
                    category: PromptCategory::Relationships,
                },
                PromptSeed {
                    text: "What goal moved forward today?".to_string(),
                    category: PromptCategory::Goals,
                },
            ],
        })
        .expect("seed prompts");

    Fixture {
        _temp_dir: temp_dir,
        prompts,
        journal: JournalService::new(db),
    }
}

impl Fixture {
    fn prompt(&self, category: PromptCategory) -> Prompt {
        self.prompts
            .all_prompts()
            .unwrap()
            .into_iter()
            .find(|p| p.category == category)
            .unwrap()
    }

    fn write(
        &self,
        at: DateTime<Utc>,
        prompt: Option<&Prompt>,
        content: &str,
        mood: Option<Mood>,
    ) -> uuid::Uuid {
        let entry = self.journal.create_entry(prompt, &at).unwrap();
        self.journal.save_entry(entry.id, content, mood, &at).unwrap();
        entry.id
    }
}

#[test]
fn test_search_matches_content_and_prompt_text() {
    let fx = set_up();
    let now = fixed_now();
    let relationships = fx.prompt(PromptCategory::Relationships);
    let goals = fx.prompt(PromptCategory::Goals);

    let by_content = fx.write(now - Duration::days(2), Some(&goals), "Family dinner ran late.", None);
    let by_prompt = fx.write(now - Duration::days(1), Some(&relationships), "My brother, again.", None);
    fx.write(now, None, "Nothing to report.", None);

    let found = fx.journal.list(&EntryFilter::search("family")).unwrap();
    let ids: Vec<_> = found.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![by_prompt, by_content]);
}

#[test]
fn test_blank_search_lists_everything() {
    let fx = set_up();
    let now = fixed_now();
    fx.write(now - Duration::days(1), None, "One", None);
    fx.write(now, None, "Two", None);

    assert_eq!(fx.journal.list(&EntryFilter::search("   ")).unwrap().len(), 2);
}

#[test]
fn test_filters_combine() {
    let fx = set_up();
    let now = fixed_now();
    let goals = fx.prompt(PromptCategory::Goals);

    let wanted = fx.write(now, Some(&goals), "Shipped it", Some(Mood::VeryHappy));
    fx.write(now - Duration::days(1), Some(&goals), "Shipped nothing", Some(Mood::Sad));
    fx.write(now - Duration::days(2), None, "Shipped a letter", Some(Mood::VeryHappy));

    let filter = EntryFilter::search("shipped")
        .with_category(PromptCategory::Goals)
        .with_mood(Mood::VeryHappy);
    let found = fx.journal.list(&filter).unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, wanted);
}

#[test]
fn test_grouping_across_two_months() {
    let fx = set_up();
    let dec = Utc.with_ymd_and_hms(2023, 12, 28, 10, 0, 0).unwrap();
    let jan = fixed_now();

    fx.write(dec, None, "Year end", None);
    fx.write(dec + Duration::days(1), None, "Almost there", None);
    fx.write(jan, None, "New year", None);

    let groups = fx
        .journal
        .list_by_month(&EntryFilter::default(), &Utc)
        .unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "January 2024");
    assert_eq!(groups[0].entries.len(), 1);
    assert_eq!(groups[1].label, "December 2023");
    assert_eq!(groups[1].entries.len(), 2);
    assert!(groups[1].entries[0].created_at > groups[1].entries[1].created_at);
}

#[test]
fn test_grouping_uses_local_month() {
    let fx = set_up();
    // 2024-02-01 02:00 UTC is still January at UTC-5
    fx.write(Utc.with_ymd_and_hms(2024, 2, 1, 2, 0, 0).unwrap(), None, "Late", None);

    let tz = FixedOffset::west_opt(5 * 3600).unwrap();
    let groups = fx.journal.list_by_month(&EntryFilter::default(), &tz).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "January 2024");
}

#[test]
fn test_streak_examples() {
    let now = fixed_now();
    let cases: [(&[i64], u32); 4] = [
        (&[0, 1, 2], 3),
        (&[1, 2], 2),
        (&[2], 0),
        (&[0, 0], 1),
    ];

    for (days_ago, expected) in cases {
        let fx = set_up();
        for days in days_ago {
            fx.write(now - Duration::days(*days), None, "Entry", None);
        }
        assert_eq!(
            fx.journal.streak(&now).unwrap(),
            expected,
            "entries {:?} days ago",
            days_ago
        );
    }
}

#[test]
fn test_stats_on_empty_journal() {
    let fx = set_up();
    let stats = fx.journal.stats(&fixed_now()).unwrap();
    assert_eq!(stats.total_entries, 0);
    assert_eq!(stats.current_streak, 0);
    assert!(fx.journal.todays_entry(&fixed_now()).unwrap().is_none());
}
