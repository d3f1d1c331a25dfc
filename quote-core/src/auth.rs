//! Session gate for the app lock.
//!
//! The lock keeps casual eyes off a shared shop computer, nothing more: the
//! stored password is compared as a plain string, there is no hashing and no
//! attempt limit. The unlocked state lives only inside the running process.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("incorrect password")]
    IncorrectPassword,
}

/// Whether the operator has unlocked this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Locked,
    Unlocked,
}

#[derive(Debug)]
pub struct SessionGate {
    password: Option<String>,
    state: SessionState,
}

impl SessionGate {
    /// Builds the gate for a fresh session.
    ///
    /// With no password configured (or an empty one) the gate starts and
    /// stays unlocked.
    pub fn new(password: Option<String>) -> Self {
        let password = password.filter(|p| !p.is_empty());
        let state = if password.is_some() {
            SessionState::Locked
        } else {
            SessionState::Unlocked
        };
        Self { password, state }
    }

    /// Rebuilds the gate mid-session, honouring an already-unlocked marker
    /// so reconstructing app state does not demand the password again.
    pub fn resume(
        password: Option<String>,
        was_unlocked: bool,
    ) -> Self {
        let mut gate = Self::new(password);
        if was_unlocked {
            gate.state = SessionState::Unlocked;
        }
        gate
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == SessionState::Unlocked
    }

    /// True when a password is configured and the lock screen applies.
    pub fn requires_password(&self) -> bool {
        self.password.is_some()
    }

    /// Attempts to unlock with the supplied password.
    ///
    /// The comparison is exact and case sensitive. A failed attempt leaves
    /// the gate locked and costs nothing; the operator may retry forever.
    pub fn unlock(
        &mut self,
        input: &str,
    ) -> Result<(), AuthError> {
        match &self.password {
            Some(stored) if stored != input => Err(AuthError::IncorrectPassword),
            _ => {
                self.state = SessionState::Unlocked;
                Ok(())
            }
        }
    }

    /// Locks the gate again (operator logout).
    /// A no-op when no password is configured, since there is nothing to
    /// unlock it with.
    pub fn lock(&mut self) {
        if self.password.is_some() {
            self.state = SessionState::Locked;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn no_password_means_never_locked() {
        let gate = SessionGate::new(None);

        assert!(gate.is_unlocked());
        assert!(!gate.requires_password());
    }

    #[test]
    fn empty_password_is_treated_as_unset() {
        let gate = SessionGate::new(Some(String::new()));

        assert!(gate.is_unlocked());
        assert!(!gate.requires_password());
    }

    #[test]
    fn configured_password_starts_locked() {
        let gate = SessionGate::new(Some("wheels".to_string()));

        assert_eq!(gate.state(), SessionState::Locked);
        assert!(gate.requires_password());
    }

    #[test]
    fn correct_password_unlocks() {
        let mut gate = SessionGate::new(Some("wheels".to_string()));

        assert_eq!(gate.unlock("wheels"), Ok(()));
        assert!(gate.is_unlocked());
    }

    #[test]
    fn wrong_password_stays_locked() {
        let mut gate = SessionGate::new(Some("wheels".to_string()));

        assert_eq!(gate.unlock("tyres"), Err(AuthError::IncorrectPassword));
        assert!(!gate.is_unlocked());
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut gate = SessionGate::new(Some("Wheels".to_string()));

        assert_eq!(gate.unlock("wheels"), Err(AuthError::IncorrectPassword));
        assert_eq!(gate.unlock("Wheels"), Ok(()));
    }

    #[test]
    fn retries_are_unlimited() {
        let mut gate = SessionGate::new(Some("wheels".to_string()));

        for _ in 0..5 {
            assert!(gate.unlock("nope").is_err());
        }
        assert_eq!(gate.unlock("wheels"), Ok(()));
    }

    #[test]
    fn lock_requires_a_fresh_unlock() {
        let mut gate = SessionGate::new(Some("wheels".to_string()));
        gate.unlock("wheels").unwrap();

        gate.lock();

        assert!(!gate.is_unlocked());
        assert_eq!(gate.unlock("wheels"), Ok(()));
    }

    #[test]
    fn lock_without_password_is_a_no_op() {
        let mut gate = SessionGate::new(None);

        gate.lock();

        assert!(gate.is_unlocked());
    }

    #[test]
    fn resume_honours_the_session_marker() {
        let gate = SessionGate::resume(Some("wheels".to_string()), true);

        assert!(gate.is_unlocked());
    }

    #[test]
    fn resume_without_marker_stays_locked() {
        let gate = SessionGate::resume(Some("wheels".to_string()), false);

        assert!(!gate.is_unlocked());
    }
}
