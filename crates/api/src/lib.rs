//! HTTP API: the network boundary of the token issuer and verifier.

pub mod app;
pub mod config;
pub mod context;
pub mod identity_client;
pub mod middleware;
