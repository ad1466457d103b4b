//! `keystone-session` — client-side session state.
//!
//! **Responsibility:** decide, from local state alone, whether the user is
//! signed in and what they may see.
//!
//! - [`SessionStore`]: the `Anonymous`/`Authenticated` state machine, mutated
//!   only by [`SessionAction`]s
//! - [`SessionDispatcher`]: runs a store on a single task (single writer)
//! - [`gate`], [`navigation`], [`views`]: read-only projections used by the
//!   presentation layer
//!
//! The presentation layer itself (markup, styling) is not part of this crate.

pub mod action;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gate;
pub mod navigation;
pub mod state;
pub mod store;
pub mod views;

pub use action::{ActionKind, SessionAction};
pub use config::{ClientConfig, Environment};
pub use dispatcher::SessionDispatcher;
pub use error::SessionError;
pub use gate::{Region, Visibility};
pub use navigation::{NavItem, Route, RouteDecision};
pub use state::{Phase, SessionState};
pub use store::{SessionStore, Transition};
