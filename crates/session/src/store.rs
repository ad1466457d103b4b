//! The session state machine.
//!
//! ```text
//!   Anonymous ──login(i)──→ Authenticated(i) ──login(j)──→ Authenticated(j)
//!       ↑  │                      │
//!       │  └──logout (no-op)      │
//!       └─────────logout──────────┘
//! ```
//!
//! `SessionStore` is owned by exactly one writer (the UI dispatch loop or a
//! [`SessionDispatcher`](crate::SessionDispatcher)); `dispatch` takes
//! `&mut self`, so a login can never interleave with a logout.

use serde::Serialize;

use crate::{ActionKind, Phase, SessionAction, SessionState};

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub action: ActionKind,
    pub from: Phase,
    pub to: Phase,
}

impl Transition {
    /// True when this transition ended a session via `logout`.
    pub fn signed_out(&self) -> bool {
        match self.action {
            ActionKind::Logout => self.from == Phase::Authenticated,
            ActionKind::Login => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    /// A fresh store in the `Anonymous` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the current state.
    pub fn select_session(&self) -> &SessionState {
        &self.state
    }

    /// Apply an action. Both fields of the state change together.
    pub fn dispatch(&mut self, action: SessionAction) -> Transition {
        let from = self.state.phase();
        let kind = action.kind();

        self.state = match action {
            SessionAction::Login(identity) => {
                tracing::info!(user_id = %identity.id(), role = %identity.role(), "session login");
                SessionState::Authenticated(identity)
            }
            SessionAction::Logout => {
                if from == Phase::Authenticated {
                    tracing::info!("session logout");
                }
                SessionState::Anonymous
            }
        };

        Transition {
            action: kind,
            from,
            to: self.state.phase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use keystone_auth::{Identity, IdentityDraft, Role};
    use keystone_core::UserId;
    use proptest::prelude::*;

    use super::*;

    fn identity(id: &str, name: &str, role: Role) -> Identity {
        let email = format!("{}@x.com", name.to_lowercase());
        Identity::new(UserId::new(id).unwrap(), name, email, role).unwrap()
    }

    #[test]
    fn login_then_logout() {
        let mut store = SessionStore::new();
        let ann = identity("u1", "Ann", Role::User);

        let t = store.dispatch(SessionAction::login_identity(ann.clone()));
        assert_eq!((t.from, t.to), (Phase::Anonymous, Phase::Authenticated));
        assert!(store.select_session().is_authenticated());
        assert_eq!(store.select_session().user(), Some(&ann));

        let t = store.dispatch(SessionAction::logout());
        assert!(t.signed_out());
        assert_eq!(store.select_session(), &SessionState::Anonymous);
    }

    #[test]
    fn transition_records_action_kind() {
        let mut store = SessionStore::new();
        let t = store.dispatch(SessionAction::login_identity(identity("u1", "Ann", Role::User)));
        assert_eq!(t.action, ActionKind::Login);
        assert!(!t.signed_out());

        let t = store.dispatch(SessionAction::logout());
        assert_eq!(t.action, ActionKind::Logout);
        assert_eq!(
            serde_json::to_value(t).unwrap(),
            serde_json::json!({"action": "logout", "from": "authenticated", "to": "anonymous"})
        );
    }

    #[test]
    fn logout_is_idempotent() {
        let mut store = SessionStore::new();
        store.dispatch(SessionAction::login_identity(identity("u1", "Ann", Role::User)));
        store.dispatch(SessionAction::logout());

        let t = store.dispatch(SessionAction::logout());
        assert!(!t.signed_out());
        assert_eq!((t.from, t.to), (Phase::Anonymous, Phase::Anonymous));
        assert_eq!(store.select_session(), &SessionState::Anonymous);
    }

    #[test]
    fn relogin_overwrites_identity() {
        let mut store = SessionStore::new();
        store.dispatch(SessionAction::login_identity(identity("u1", "Ann", Role::User)));
        let t = store.dispatch(SessionAction::login_identity(identity("u2", "Bo", Role::Admin)));

        assert_eq!((t.from, t.to), (Phase::Authenticated, Phase::Authenticated));
        let user = store.select_session().user().unwrap();
        assert_eq!(user.id().as_str(), "u2");
        assert_eq!(user.role(), Role::Admin);
    }

    #[test]
    fn admin_login_scenario() {
        let mut store = SessionStore::new();
        let action = SessionAction::login(IdentityDraft {
            id: Some("u2".into()),
            name: Some("Bo".into()),
            email: Some("bo@x.com".into()),
            role: Some("admin".into()),
            created_at: None,
        })
        .unwrap();
        store.dispatch(action);

        assert_eq!(store.select_session().role(), Some(Role::Admin));
        assert_eq!(
            crate::gate::admin_panel(store.select_session()),
            crate::Visibility::Visible
        );
    }

    #[test]
    fn rejected_login_leaves_state_untouched() {
        let mut store = SessionStore::new();
        store.dispatch(SessionAction::login_identity(identity("u1", "Ann", Role::User)));
        let before = store.select_session().clone();

        let bad = SessionAction::login(IdentityDraft {
            id: Some("u9".into()),
            ..Default::default()
        });
        assert!(bad.is_err());
        assert_eq!(store.select_session(), &before);
    }

    fn arb_action() -> impl Strategy<Value = SessionAction> {
        prop_oneof![
            Just(SessionAction::Logout),
            ("[a-z0-9]{1,8}", prop::bool::ANY).prop_map(|(id, admin)| {
                let role = if admin { Role::Admin } else { Role::User };
                SessionAction::login_identity(identity(&id, "Someone", role))
            }),
        ]
    }

    proptest! {
        /// Property: the state always reflects the last action, whatever came before.
        #[test]
        fn state_reflects_last_action(actions in prop::collection::vec(arb_action(), 1..40)) {
            let mut store = SessionStore::new();
            for action in &actions {
                store.dispatch(action.clone());
            }

            match actions.last().unwrap() {
                SessionAction::Logout => {
                    prop_assert_eq!(store.select_session(), &SessionState::Anonymous);
                }
                SessionAction::Login(identity) => {
                    prop_assert!(store.select_session().is_authenticated());
                    prop_assert_eq!(store.select_session().user(), Some(identity));
                }
            }
        }
    }
}
