//! Session state as seen by the presentation layer.

use serde::{Deserialize, Serialize, Serializer};

use keystone_auth::{Identity, Role};

/// Which state the session machine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Anonymous,
    Authenticated,
}

/// Client-held record of whether a user is signed in and who they are.
///
/// `is_authenticated()` is true exactly when `user()` is present: the two
/// cannot disagree because they are one enum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            SessionState::Anonymous => Phase::Anonymous,
            SessionState::Authenticated(_) => Phase::Authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&Identity> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(identity) => Some(identity),
        }
    }

    /// Role of the signed-in user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user().map(Identity::role)
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    is_authenticated: bool,
    user: Option<&'a Identity>,
}

/// Serializes as `{"is_authenticated": bool, "user": Identity | null}`.
impl Serialize for SessionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Snapshot {
            is_authenticated: self.is_authenticated(),
            user: self.user(),
        }
        .serialize(serializer)
    }
}
