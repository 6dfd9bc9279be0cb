// ============================================================================
// SESSION STATE - The one live session per tab
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::{Session, User};

/// Current session plus an epoch bumped on every login/logout.
///
/// Loaders capture the epoch before awaiting and drop their result if it
/// changed in the meantime.
#[derive(Clone, Default)]
pub struct SessionState {
    session: Rc<RefCell<Option<Session>>>,
    epoch: Rc<Cell<u64>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any existing session
    pub fn begin(&self, session: Session) {
        *self.session.borrow_mut() = Some(session);
        self.bump();
    }

    /// Drop the session; returns whether one was live
    pub fn end(&self) -> bool {
        let had_session = self.session.borrow_mut().take().is_some();
        self.bump();
        had_session
    }

    pub fn current(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_active(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    /// True while the session that was live at `epoch` is still live
    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch && self.is_active()
    }

    fn bump(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn session(name: &str) -> Session {
        Session {
            token: format!("token-{}", name),
            user: User { username: name.into(), role: Role::Operator },
            expires_at: None,
        }
    }

    #[test]
    fn epoch_changes_on_every_transition() {
        let state = SessionState::new();
        let before = state.epoch();
        assert!(!state.is_current(before));

        state.begin(session("alpha"));
        let alpha = state.epoch();
        assert_ne!(alpha, before);
        assert!(state.is_current(alpha));
        assert_eq!(state.token().as_deref(), Some("token-alpha"));

        state.begin(session("bravo"));
        assert!(!state.is_current(alpha));

        let bravo = state.epoch();
        assert!(state.end());
        assert!(!state.is_current(bravo));
        assert!(state.current().is_none());
        assert!(!state.end());
    }
}
