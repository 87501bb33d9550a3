use super::{
    AuthorizationOptions, AuthorizationStatus, NotificationCenter, NotificationRequest,
};
use crate::errors::NotificationError;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct State {
    status: AuthorizationStatus,
    grant_on_request: bool,
    pending: BTreeMap<String, NotificationRequest>,
    badge_count: u32,
}

/// Notification center kept entirely in process memory.
///
/// Useful for hosts without a platform notification service and for tests:
/// pending requests and the badge count can be inspected directly.
#[derive(Debug, Default)]
pub struct InMemoryNotificationCenter {
    state: Mutex<State>,
}

impl InMemoryNotificationCenter {
    /// A center whose permission prompt answers `grant`.
    pub fn new(grant_on_request: bool) -> Self {
        InMemoryNotificationCenter {
            state: Mutex::new(State {
                grant_on_request,
                ..State::default()
            }),
        }
    }

    /// A center where permission was already granted.
    pub fn authorized() -> Self {
        let center = Self::new(true);
        center.lock().status = AuthorizationStatus::Authorized;
        center
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pending_requests(&self) -> Vec<NotificationRequest> {
        self.lock().pending.values().cloned().collect()
    }

    pub fn pending_request(&self, identifier: &str) -> Option<NotificationRequest> {
        self.lock().pending.get(identifier).cloned()
    }

    pub fn badge_count(&self) -> u32 {
        self.lock().badge_count
    }

    /// Simulates a delivered notification raising the badge.
    pub fn deliver(&self, identifier: &str) {
        let mut state = self.lock();
        if let Some(badge) = state
            .pending
            .get(identifier)
            .and_then(|request| request.content.badge)
        {
            state.badge_count = badge;
        }
    }
}

impl NotificationCenter for InMemoryNotificationCenter {
    fn request_authorization(
        &self,
        options: AuthorizationOptions,
    ) -> Result<bool, NotificationError> {
        let mut state = self.lock();
        debug!(?options, "Permission requested");

        if state.status == AuthorizationStatus::NotDetermined {
            state.status = if state.grant_on_request {
                AuthorizationStatus::Authorized
            } else {
                AuthorizationStatus::Denied
            };
        }
        Ok(state.status == AuthorizationStatus::Authorized)
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.lock().status
    }

    fn add(&self, request: NotificationRequest) -> Result<(), NotificationError> {
        let mut state = self.lock();
        if state.status != AuthorizationStatus::Authorized {
            return Err(NotificationError::Rejected {
                identifier: request.identifier,
                reason: "notifications are not authorized".to_string(),
            });
        }
        state.pending.insert(request.identifier.clone(), request);
        Ok(())
    }

    fn remove_pending(&self, identifiers: &[&str]) {
        let mut state = self.lock();
        for identifier in identifiers {
            state.pending.remove(*identifier);
        }
    }

    fn set_badge_count(&self, count: u32) -> Result<(), NotificationError> {
        self.lock().badge_count = count;
        Ok(())
    }
}
