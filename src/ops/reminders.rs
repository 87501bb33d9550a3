//! Daily reminder scheduling.

use crate::constants::{REMINDER_BODY, REMINDER_IDENTIFIER, REMINDER_TITLE};
use crate::notify::{
    AuthorizationOptions, AuthorizationStatus, DailyTrigger, NotificationCenter,
    NotificationContent, NotificationRequest, ReminderTime,
};
use crate::preferences::Preferences;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Keeps at most one pending daily reminder in the notification center.
///
/// Notification failures never propagate: they are logged and reported as
/// `false` where a result is returned.
#[derive(Clone)]
pub struct ReminderScheduler {
    center: Arc<dyn NotificationCenter>,
}

impl ReminderScheduler {
    pub fn new(center: Arc<dyn NotificationCenter>) -> Self {
        ReminderScheduler { center }
    }

    pub fn is_authorized(&self) -> bool {
        self.center.authorization_status() == AuthorizationStatus::Authorized
    }

    /// Asks for alert, badge and sound permission.
    pub fn request_authorization(&self) -> bool {
        match self.center.request_authorization(AuthorizationOptions::ALL) {
            Ok(granted) => {
                info!(granted, "Notification permission answered");
                granted
            }
            Err(e) => {
                warn!(error = %e, "Notification permission request failed");
                false
            }
        }
    }

    /// Replaces the pending reminder with one firing daily at `time`.
    ///
    /// Returns `false` without scheduling when permission is missing.
    pub fn enable(&self, time: ReminderTime) -> bool {
        if !self.is_authorized() {
            debug!("Notifications not authorized, reminder not scheduled");
            return false;
        }

        self.center.remove_pending(&[REMINDER_IDENTIFIER]);
        match self.center.add(Self::reminder_request(time)) {
            Ok(()) => {
                info!(%time, "Daily reminder scheduled");
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to schedule daily reminder");
                false
            }
        }
    }

    /// Removes the pending reminder and clears the badge.
    pub fn disable(&self) {
        self.center.remove_pending(&[REMINDER_IDENTIFIER]);
        self.clear_badge();
        info!("Daily reminder cancelled");
    }

    /// Brings the pending reminder in line with `prefs`.
    ///
    /// Returns whether a reminder is scheduled afterwards.
    pub fn apply(&self, prefs: &Preferences) -> bool {
        if prefs.notification_enabled {
            self.enable(prefs.reminder_time())
        } else {
            self.disable();
            false
        }
    }

    pub fn clear_badge(&self) {
        if let Err(e) = self.center.set_badge_count(0) {
            warn!(error = %e, "Failed to clear badge");
        }
    }

    fn reminder_request(time: ReminderTime) -> NotificationRequest {
        NotificationRequest {
            identifier: REMINDER_IDENTIFIER.to_string(),
            content: NotificationContent {
                title: REMINDER_TITLE.to_string(),
                body: REMINDER_BODY.to_string(),
                badge: Some(1),
                sound: true,
            },
            trigger: DailyTrigger::repeating(time),
        }
    }
}
