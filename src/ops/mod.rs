//! Services orchestrating the entry store and the notification center.
//!
//! Each service is constructed once and shared by the flows that need it.
//! Services propagate errors; the [`crate::app::Daybook`] facade decides which
//! failures are swallowed.

pub mod journal;
pub mod prompts;
pub mod reminders;

pub use journal::{JournalService, JournalStats};
pub use prompts::PromptService;
pub use reminders::ReminderScheduler;
