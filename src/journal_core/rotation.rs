use crate::models::Prompt;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Chooses the prompt for a given day.
///
/// Prompts in `recently_used` are skipped unless that leaves nothing, in which
/// case every prompt is a candidate again. Candidates are sorted by text so
/// the pick `candidates[day_of_year % len]` is stable across runs.
pub fn select_daily_prompt(
    mut prompts: Vec<Prompt>,
    recently_used: &HashSet<Uuid>,
    day_of_year: u32,
) -> Option<Prompt> {
    if prompts.is_empty() {
        return None;
    }

    prompts.sort_by(|a, b| a.text.cmp(&b.text));

    let available: Vec<Prompt> = prompts
        .iter()
        .filter(|prompt| !recently_used.contains(&prompt.id))
        .cloned()
        .collect();
    let mut candidates = if available.is_empty() {
        prompts
    } else {
        available
    };

    let index = day_of_year as usize % candidates.len();
    Some(candidates.swap_remove(index))
}

/// Picks a prompt uniformly at random, avoiding `excluding`.
///
/// With a single prompt in the set that prompt is returned even when it is
/// the excluded one.
pub fn pick_random<R: Rng + ?Sized>(
    prompts: &[Prompt],
    excluding: Option<&Prompt>,
    rng: &mut R,
) -> Option<Prompt> {
    if prompts.len() <= 1 {
        return prompts.first().cloned();
    }

    let candidates: Vec<&Prompt> = prompts
        .iter()
        .filter(|prompt| excluding.map_or(true, |excluded| excluded.id != prompt.id))
        .collect();

    candidates.choose(rng).map(|prompt| (*prompt).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PromptCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn prompts(texts: &[&str]) -> Vec<Prompt> {
        texts
            .iter()
            .map(|text| Prompt::new(*text, PromptCategory::Reflection))
            .collect()
    }

    #[test]
    fn test_select_empty() {
        assert!(select_daily_prompt(Vec::new(), &HashSet::new(), 10).is_none());
    }

    #[test]
    fn test_select_indexes_sorted_texts() {
        let set = prompts(&["C", "A", "B"]);

        // 1 % 3 == 1 -> "B"; 3 % 3 == 0 -> "A"
        let pick = select_daily_prompt(set.clone(), &HashSet::new(), 1).unwrap();
        assert_eq!(pick.text, "B");
        let pick = select_daily_prompt(set, &HashSet::new(), 3).unwrap();
        assert_eq!(pick.text, "A");
    }

    #[test]
    fn test_select_is_independent_of_input_order() {
        let forward = prompts(&["A", "B", "C", "D"]);
        let mut backward = forward.clone();
        backward.reverse();

        for day in 1..=8 {
            assert_eq!(
                select_daily_prompt(forward.clone(), &HashSet::new(), day),
                select_daily_prompt(backward.clone(), &HashSet::new(), day)
            );
        }
    }

    #[test]
    fn test_select_skips_recently_used() {
        let set = prompts(&["A", "B", "C"]);
        let recent: HashSet<Uuid> = set
            .iter()
            .filter(|p| p.text != "C")
            .map(|p| p.id)
            .collect();

        for day in 1..=5 {
            let pick = select_daily_prompt(set.clone(), &recent, day).unwrap();
            assert_eq!(pick.text, "C");
        }
    }

    #[test]
    fn test_select_falls_back_when_all_recent() {
        let set = prompts(&["A", "B", "C"]);
        let recent: HashSet<Uuid> = set.iter().map(|p| p.id).collect();

        let pick = select_daily_prompt(set, &recent, 2).unwrap();
        assert_eq!(pick.text, "C");
    }

    #[test]
    fn test_pick_random_single_prompt_ignores_exclusion() {
        let set = prompts(&["Only"]);
        let mut rng = StdRng::seed_from_u64(7);

        let pick = pick_random(&set, Some(&set[0]), &mut rng).unwrap();
        assert_eq!(pick, set[0]);
    }

    #[test]
    fn test_pick_random_never_returns_excluded() {
        let set = prompts(&["A", "B", "C"]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let pick = pick_random(&set, Some(&set[1]), &mut rng).unwrap();
            assert_ne!(pick.id, set[1].id);
        }
    }

    #[test]
    fn test_pick_random_two_prompts_alternates() {
        let set = prompts(&["A", "B"]);
        let mut rng = StdRng::seed_from_u64(1);

        let pick = pick_random(&set, Some(&set[0]), &mut rng).unwrap();
        assert_eq!(pick.text, "B");
    }

    #[test]
    fn test_pick_random_is_deterministic_for_seed() {
        let set = prompts(&["A", "B", "C", "D", "E"]);

        let first = pick_random(&set, None, &mut StdRng::seed_from_u64(99));
        let second = pick_random(&set, None, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn test_pick_random_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pick_random(&[], None, &mut rng).is_none());
    }
}
