use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use crate::{error::HandoffError, types::Credentials, utils};

struct PendingLogin {
    credentials: Credentials,
    created_at: Instant,
}

/// Logins waiting for their OAuth callback.
///
/// The `state` sent through the authorize redirect is a random key into
/// this table; the credentials never leave the process. Each state can be
/// redeemed once and only within `ttl`.
pub struct PendingLogins {
    ttl: Duration,
    pending: HashMap<String, PendingLogin>,
}

impl PendingLogins {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: HashMap::new(),
        }
    }

    /// Registers a login and returns the `state` value identifying it.
    pub fn begin(&mut self, credentials: Credentials) -> String {
        self.begin_at(credentials, Instant::now())
    }

    /// Redeems `state`. Succeeds at most once per state.
    pub fn take(&mut self, state: &str) -> Result<Credentials, HandoffError> {
        self.take_at(state, Instant::now())
    }

    /// Whether a login that has not expired yet is waiting for its callback.
    pub fn has_pending(&mut self) -> bool {
        self.purge(Instant::now());
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn begin_at(&mut self, credentials: Credentials, now: Instant) -> String {
        self.purge(now);
        let state = utils::generate_state();
        self.pending.insert(
            state.clone(),
            PendingLogin {
                credentials,
                created_at: now,
            },
        );
        state
    }

    fn take_at(&mut self, state: &str, now: Instant) -> Result<Credentials, HandoffError> {
        let login = self
            .pending
            .remove(state)
            .ok_or(HandoffError::UnknownState)?;
        if now.duration_since(login.created_at) > self.ttl {
            return Err(HandoffError::Expired);
        }
        Ok(login.credentials)
    }

    fn purge(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.pending
            .retain(|_, login| now.duration_since(login.created_at) <= ttl);
    }
}
