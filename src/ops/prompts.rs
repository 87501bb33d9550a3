//! Daily prompt rotation.

use crate::catalog::PromptCatalog;
use crate::constants::RECENT_PROMPT_WINDOW_DAYS;
use crate::db::{prompts, Database};
use crate::errors::AppResult;
use crate::journal_core::{day_of_year, pick_random, select_daily_prompt};
use crate::models::Prompt;
use chrono::{DateTime, Duration, SubsecRound, TimeZone, Utc};
use rand::Rng;
use tracing::{debug, info};
use uuid::Uuid;

/// Chooses which prompt to show and records prompt usage.
#[derive(Clone)]
pub struct PromptService {
    db: Database,
}

impl PromptService {
    pub fn new(db: Database) -> Self {
        PromptService { db }
    }

    /// Merges the catalog into storage by exact text. Safe to call on every launch.
    ///
    /// Returns the number of prompts inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written; no prompt is
    /// inserted in that case.
    pub fn seed_if_needed(&self, catalog: &PromptCatalog) -> AppResult<usize> {
        if catalog.is_empty() {
            debug!("Prompt catalog is empty, nothing to seed");
            return Ok(0);
        }
        let conn = self.db.get_conn()?;
        prompts::merge_catalog(&conn, &catalog.prompts)
    }

    /// Every stored prompt, ordered by text.
    pub fn all_prompts(&self) -> AppResult<Vec<Prompt>> {
        let conn = self.db.get_conn()?;
        prompts::list_prompts(&conn)
    }

    /// The prompt for `now`'s calendar day.
    ///
    /// Prompts used during the last seven days are skipped while others
    /// remain. Returns `Ok(None)` only when no prompt is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn todays_prompt<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AppResult<Option<Prompt>> {
        let conn = self.db.get_conn()?;
        let all = prompts::list_prompts(&conn)?;
        if all.is_empty() {
            return Ok(None);
        }

        let since = now.with_timezone(&Utc) - Duration::days(RECENT_PROMPT_WINDOW_DAYS);
        let recent = prompts::recently_used_prompt_ids(&conn, since)?;

        let pick = select_daily_prompt(all, &recent, day_of_year(now));
        if let Some(prompt) = &pick {
            debug!(prompt_id = %prompt.id, "Selected today's prompt");
        }
        Ok(pick)
    }

    /// Records that the user started writing with `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt no longer exists or the store fails.
    pub fn mark_used<Tz: TimeZone>(&self, prompt: &Prompt, now: &DateTime<Tz>) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        prompts::set_last_used(&conn, prompt.id, now.with_timezone(&Utc).trunc_subsecs(6))
    }

    /// A random prompt other than `excluding`, for manual shuffling.
    ///
    /// Does not mark the prompt as used.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn random_prompt<R: Rng + ?Sized>(
        &self,
        excluding: Option<&Prompt>,
        rng: &mut R,
    ) -> AppResult<Option<Prompt>> {
        let all = self.all_prompts()?;
        Ok(pick_random(&all, excluding, rng))
    }

    /// Deletes a prompt; entries that referenced it keep their content.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt doesn't exist or the store fails.
    pub fn delete_prompt(&self, id: Uuid) -> AppResult<usize> {
        let conn = self.db.get_conn()?;
        let detached = prompts::delete_prompt(&conn, id)?;
        info!(prompt_id = %id, detached, "Prompt deleted");
        Ok(detached)
    }
}
