//! Route guards and the navigation bar model.

use serde::Serialize;

use crate::{SessionState, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Profile,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Profile => "/profile",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Home),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            "/dashboard" => Some(Route::Dashboard),
            "/profile" => Some(Route::Profile),
            _ => None,
        }
    }

    /// Requires a signed-in user.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Profile)
    }

    /// Only meaningful while signed out.
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "lowercase")]
pub enum RouteDecision {
    Allow,
    Redirect(Route),
}

/// Decide whether `route` may render for the current session.
pub fn guard(route: Route, state: &SessionState) -> RouteDecision {
    match (state.is_authenticated(), route) {
        (false, r) if r.is_protected() => RouteDecision::Redirect(Route::Login),
        (true, r) if r.is_guest_only() => RouteDecision::Redirect(Route::Dashboard),
        _ => RouteDecision::Allow,
    }
}

/// Where to navigate after an action was applied, if anywhere.
///
/// Called with the transition returned by `dispatch`, i.e. after the state
/// change has happened.
pub fn redirect_after(transition: &Transition) -> Option<Route> {
    if transition.signed_out() {
        Some(Route::Login)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavItem {
    Brand { route: Route, label: &'static str },
    Link { route: Route, label: &'static str },
    Greeting { text: String },
    LogoutButton,
}

/// Items of the top navigation bar, in display order.
pub fn nav_links(state: &SessionState) -> Vec<NavItem> {
    let mut items = vec![NavItem::Brand {
        route: Route::Home,
        label: "Auth App",
    }];

    match state.user() {
        Some(user) => {
            items.push(NavItem::Link {
                route: Route::Dashboard,
                label: "Dashboard",
            });
            items.push(NavItem::Link {
                route: Route::Profile,
                label: "Profile",
            });
            items.push(NavItem::Greeting {
                text: format!("Welcome, {}", user.name()),
            });
            items.push(NavItem::LogoutButton);
        }
        None => {
            items.push(NavItem::Link {
                route: Route::Login,
                label: "Login",
            });
            items.push(NavItem::Link {
                route: Route::Register,
                label: "Register",
            });
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use keystone_auth::{Identity, Role};
    use keystone_core::UserId;

    use super::*;
    use crate::{SessionAction, SessionStore};

    fn ann() -> Identity {
        Identity::new(UserId::new("u1").unwrap(), "Ann", "ann@x.com", Role::User).unwrap()
    }

    #[test]
    fn protected_routes_redirect_anonymous_to_login() {
        let anon = SessionState::Anonymous;
        assert_eq!(guard(Route::Dashboard, &anon), RouteDecision::Redirect(Route::Login));
        assert_eq!(guard(Route::Profile, &anon), RouteDecision::Redirect(Route::Login));
        assert_eq!(guard(Route::Home, &anon), RouteDecision::Allow);
        assert_eq!(guard(Route::Login, &anon), RouteDecision::Allow);
    }

    #[test]
    fn guest_routes_redirect_signed_in_users() {
        let state = SessionState::Authenticated(ann());
        assert_eq!(guard(Route::Login, &state), RouteDecision::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::Register, &state), RouteDecision::Redirect(Route::Dashboard));
        assert_eq!(guard(Route::Dashboard, &state), RouteDecision::Allow);
    }

    #[test]
    fn logout_redirects_only_after_signing_out() {
        let mut store = SessionStore::new();
        let t = store.dispatch(SessionAction::logout());
        assert_eq!(redirect_after(&t), None);

        let t = store.dispatch(SessionAction::login_identity(ann()));
        assert_eq!(redirect_after(&t), None);

        let t = store.dispatch(SessionAction::logout());
        assert_eq!(redirect_after(&t), Some(Route::Login));
        // The redirect target is computed from a transition that already happened.
        assert_eq!(guard(Route::Dashboard, store.select_session()), RouteDecision::Redirect(Route::Login));
    }

    #[test]
    fn nav_bar_depends_on_session() {
        let anon = nav_links(&SessionState::Anonymous);
        assert!(anon.contains(&NavItem::Link { route: Route::Login, label: "Login" }));
        assert!(!anon.contains(&NavItem::LogoutButton));

        let signed_in = nav_links(&SessionState::Authenticated(ann()));
        assert!(signed_in.contains(&NavItem::Greeting { text: "Welcome, Ann".into() }));
        assert!(signed_in.contains(&NavItem::LogoutButton));
        assert!(!signed_in.iter().any(|i| matches!(i, NavItem::Link { route: Route::Login, .. })));
    }

    #[test]
    fn paths_round_trip() {
        for route in [Route::Home, Route::Login, Route::Register, Route::Dashboard, Route::Profile] {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/admin"), None);
    }
}
