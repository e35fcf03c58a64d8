//! GitHub backend for checkrun.
//!
//! [`GitHubClient`] implements the hosting-service traits of
//! `checkrun-status` on top of octocrab: check runs for app installations and
//! commit statuses plus pull-request comments for everything else.
//!
//! ```no_run
//! # async fn run() -> checkrun_core::Result<()> {
//! use std::sync::Arc;
//! use checkrun_status::HostingService;
//!
//! let hosting = checkrun_github::GitHubClient::from_env()?
//!     .map(|client| Arc::new(client) as Arc<dyn HostingService>);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod wire;

pub use client::{API_URL_ENV, GitHubClient, TOKEN_ENV};
pub use wire::MAX_ANNOTATIONS_PER_REQUEST;
