//! GameLink read-state service: HTTP boundary over the unread reconciler.
//!
//! ## Modules
//!
//! - [`auth`] – session token extraction and verification
//! - [`config`] – env-driven server configuration
//! - [`error`] – ApiError responses for the write path
//! - [`logger`] – tracing initialization
//! - [`routes`] – axum router and handlers
//! - [`service`] – read-path orchestration (fetch, then reconcile)
//! - [`state`] – shared application state

pub mod auth;
pub mod config;
pub mod error;
pub mod logger;
pub mod routes;
pub mod service;
pub mod state;
