//! Top-level screen state machine.
//!
//! [`transition`] is the whole table of legal moves. It is pure; the
//! application-layer navigator applies the side effects (identity, demo
//! flag, session reset) that go with each move.

use crate::auth::UserIdentity;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Which screen is shown.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum AppState {
    #[default]
    Landing,
    Auth,
    Dashboard,
}

/// User-initiated navigation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum NavigationAction {
    GetStarted,
    SignIn,
    TryDemo,
    CancelToLanding,
    Logout,
}

/// Returns the next state, or `None` when the action does nothing in `state`.
///
/// Reaching `Dashboard` from `Auth` is not a user action; see
/// [`after_authentication`].
pub fn transition(state: AppState, action: NavigationAction) -> Option<AppState> {
    use AppState::*;
    use NavigationAction::*;

    match (state, action) {
        (Landing, GetStarted | SignIn) => Some(Auth),
        (Landing, TryDemo) => Some(Dashboard),
        (Auth, CancelToLanding) => Some(Landing),
        (Dashboard, Logout) => Some(Landing),
        _ => None,
    }
}

/// Next state once credentials are accepted. Only `Auth` moves on.
pub fn after_authentication(state: AppState) -> Option<AppState> {
    (state == AppState::Auth).then_some(AppState::Dashboard)
}

/// Point-in-time view of the navigator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationSnapshot {
    pub state: AppState,
    pub demo_mode: bool,
    pub identity: Option<UserIdentity>,
}

impl NavigationSnapshot {
    /// On the dashboard exactly one of identity or demo mode holds;
    /// elsewhere neither does.
    pub fn is_consistent(&self) -> bool {
        match self.state {
            AppState::Dashboard => self.demo_mode != self.identity.is_some(),
            AppState::Landing | AppState::Auth => !self.demo_mode && self.identity.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_legal_transitions() {
        use AppState::*;
        use NavigationAction::*;

        assert_eq!(transition(Landing, GetStarted), Some(Auth));
        assert_eq!(transition(Landing, SignIn), Some(Auth));
        assert_eq!(transition(Landing, TryDemo), Some(Dashboard));
        assert_eq!(transition(Auth, CancelToLanding), Some(Landing));
        assert_eq!(transition(Dashboard, Logout), Some(Landing));
    }

    #[test]
    fn test_everything_else_is_a_no_op() {
        let legal = 5;
        let moves = AppState::iter()
            .flat_map(|s| NavigationAction::iter().map(move |a| (s, a)))
            .filter(|(s, a)| transition(*s, *a).is_some())
            .count();
        assert_eq!(moves, legal);

        assert_eq!(transition(AppState::Auth, NavigationAction::TryDemo), None);
        assert_eq!(transition(AppState::Landing, NavigationAction::Logout), None);
        assert_eq!(transition(AppState::Dashboard, NavigationAction::SignIn), None);
    }

    #[test]
    fn test_after_authentication_only_from_auth() {
        assert_eq!(
            after_authentication(AppState::Auth),
            Some(AppState::Dashboard)
        );
        assert_eq!(after_authentication(AppState::Landing), None);
        assert_eq!(after_authentication(AppState::Dashboard), None);
    }

    #[test]
    fn test_snapshot_consistency() {
        let mut snapshot = NavigationSnapshot::default();
        assert!(snapshot.is_consistent());

        snapshot.state = AppState::Dashboard;
        assert!(!snapshot.is_consistent());

        snapshot.demo_mode = true;
        assert!(snapshot.is_consistent());

        snapshot.identity = Some(UserIdentity::new("a@b.com"));
        assert!(!snapshot.is_consistent());

        snapshot.demo_mode = false;
        assert!(snapshot.is_consistent());

        snapshot.state = AppState::Landing;
        assert!(!snapshot.is_consistent());
    }
}
