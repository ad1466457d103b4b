//! Role-gated UI regions.
//!
//! Gating fails closed: with no user, or a role that does not grant the
//! region, the region is [`Visibility::Hidden`] (not rendered at all, never
//! shown disabled).

use serde::Serialize;

use keystone_auth::Role;

use crate::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub fn is_visible(&self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// UI regions that depend on who is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Administrative controls on the dashboard.
    AdminPanel,
    /// Account details and quick actions for any signed-in user.
    AccountSummary,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::AdminPanel, Region::AccountSummary];

    /// Minimum role that may see the region.
    pub fn required_role(&self) -> Role {
        match self {
            Region::AdminPanel => Role::Admin,
            Region::AccountSummary => Role::User,
        }
    }
}

pub fn visibility(region: Region, state: &SessionState) -> Visibility {
    match state.role() {
        Some(role) if role.grants(region.required_role()) => Visibility::Visible,
        Some(_) | None => Visibility::Hidden,
    }
}

pub fn admin_panel(state: &SessionState) -> Visibility {
    visibility(Region::AdminPanel, state)
}
