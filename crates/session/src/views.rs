//! View models for the signed-in pages.
//!
//! These are pure projections of [`SessionState`]; none of them can mutate
//! the store.

use chrono::{DateTime, Utc};
use serde::Serialize;

use keystone_auth::Identity;
use keystone_auth::identity::validate_email;
use keystone_core::{DomainError, DomainResult};

use crate::SessionState;
use crate::gate::{self, Region};

/// Administrative section of the dashboard. Only constructed for admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminPanel {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub name: String,
    pub email: String,
    pub role_label: &'static str,
    pub admin_panel: Option<AdminPanel>,
}

impl DashboardView {
    /// `None` while signed out.
    pub fn from_session(state: &SessionState) -> Option<Self> {
        let user = state.user()?;

        let admin_panel = gate::visibility(Region::AdminPanel, state)
            .is_visible()
            .then_some(AdminPanel {
                title: "Admin Panel",
                description: "You have administrative privileges. You can manage users and access advanced features.",
            });

        Some(Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
            role_label: user.role().label(),
            admin_panel,
        })
    }
}

/// Profile change to send to the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileMode {
    Viewing,
    Editing,
}

/// Local state of the profile page's edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    mode: ProfileMode,
    name: String,
    email: String,
    role_label: &'static str,
    created_at: Option<DateTime<Utc>>,
}

impl ProfileForm {
    /// `None` while signed out.
    pub fn from_session(state: &SessionState) -> Option<Self> {
        state.user().map(Self::for_identity)
    }

    fn for_identity(user: &Identity) -> Self {
        Self {
            mode: ProfileMode::Viewing,
            name: user.name().to_string(),
            email: user.email().to_string(),
            role_label: user.role().label(),
            created_at: user.created_at(),
        }
    }

    pub fn mode(&self) -> ProfileMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role_label(&self) -> &'static str {
        self.role_label
    }

    /// Creation date for display, or `"N/A"` when the identity service did
    /// not report one.
    pub fn member_since(&self) -> String {
        self.created_at
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Toggle between viewing and editing. Leaving edit mode discards edits.
    pub fn toggle_edit(&mut self, stored: &Identity) {
        match self.mode {
            ProfileMode::Viewing => self.mode = ProfileMode::Editing,
            ProfileMode::Editing => self.cancel(stored),
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if self.mode == ProfileMode::Editing {
            self.name = name.into();
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if self.mode == ProfileMode::Editing {
            self.email = email.into();
        }
    }

    /// Reset the fields to the stored identity and leave edit mode.
    pub fn cancel(&mut self, stored: &Identity) {
        *self = Self::for_identity(stored);
    }

    /// Validate the edits and produce the update request.
    ///
    /// The session store is not touched; the new identity arrives through a
    /// fresh `login` once the identity service accepts the change.
    pub fn submit(&mut self) -> DomainResult<ProfileUpdate> {
        if self.mode != ProfileMode::Editing {
            return Err(DomainError::validation("profile is not being edited"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be blank"));
        }
        validate_email(&self.email)?;

        self.mode = ProfileMode::Viewing;
        Ok(ProfileUpdate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use keystone_auth::Role;
    use keystone_core::UserId;

    use super::*;

    fn user(role: Role) -> Identity {
        Identity::new(UserId::new("u1").unwrap(), "Ann", "ann@x.com", role).unwrap()
    }

    #[test]
    fn dashboard_absent_when_signed_out() {
        assert_eq!(DashboardView::from_session(&SessionState::Anonymous), None);
    }

    #[test]
    fn dashboard_admin_panel_only_for_admin() {
        let view = DashboardView::from_session(&SessionState::Authenticated(user(Role::User))).unwrap();
        assert_eq!(view.role_label, "User");
        assert!(view.admin_panel.is_none());

        let view = DashboardView::from_session(&SessionState::Authenticated(user(Role::Admin))).unwrap();
        assert_eq!(view.role_label, "Admin");
        assert_eq!(view.admin_panel.unwrap().title, "Admin Panel");
    }

    #[test]
    fn profile_edit_cancel_restores_stored_identity() {
        let stored = user(Role::User);
        let mut form = ProfileForm::from_session(&SessionState::Authenticated(stored.clone())).unwrap();

        form.set_name("ignored while viewing");
        assert_eq!(form.name(), "Ann");

        form.toggle_edit(&stored);
        form.set_name("Annie");
        assert_eq!(form.name(), "Annie");

        form.cancel(&stored);
        assert_eq!(form.mode(), ProfileMode::Viewing);
        assert_eq!(form.name(), "Ann");
    }

    #[test]
    fn profile_submit_validates_and_returns_update() {
        let stored = user(Role::User);
        let mut form = ProfileForm::from_session(&SessionState::Authenticated(stored.clone())).unwrap();
        assert!(form.submit().is_err());

        form.toggle_edit(&stored);
        form.set_email("not-an-email");
        assert!(form.submit().is_err());
        assert_eq!(form.mode(), ProfileMode::Editing);

        form.set_email("annie@x.com");
        form.set_name(" Annie ");
        let update = form.submit().unwrap();
        assert_eq!(update, ProfileUpdate { name: "Annie".into(), email: "annie@x.com".into() });
        assert_eq!(form.mode(), ProfileMode::Viewing);
    }

    #[test]
    fn member_since_falls_back_to_na() {
        let stored = user(Role::User);
        let form = ProfileForm::from_session(&SessionState::Authenticated(stored.clone())).unwrap();
        assert_eq!(form.member_since(), "N/A");

        let dated = stored.with_created_at(Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap());
        let form = ProfileForm::from_session(&SessionState::Authenticated(dated)).unwrap();
        assert_eq!(form.member_since(), "2024-03-09");
    }
}
