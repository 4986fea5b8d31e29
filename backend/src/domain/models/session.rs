//! Explicit session context handed to store load/save operations.
use chrono::{DateTime, Utc};

/// Gate for persistence access. Nothing is read or written while inactive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    started_at: DateTime<Utc>,
    active: bool,
}

impl Session {
    /// Begin an inactive session at application start
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            active: false,
        }
    }

    /// Start a session that is already logged in
    pub fn active() -> Self {
        let mut session = Self::start();
        session.login();
        session
    }

    pub fn login(&mut self) {
        self.active = true;
    }

    pub fn logout(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
