//! Client library for the StaffDesk employee administration API.
//!
//! The core is an authenticated HTTP client ([`api::ApiClient`]) that
//! attaches the stored bearer token to every request, transparently refreshes
//! it on 401/403 through a single shared exchange, and retries the failed
//! request exactly once. Around it: pluggable session stores
//! ([`session::SessionStore`]), an auth-lost broadcast ([`events`]), and
//! typed bindings for the backend's endpoints (employees, absences, access
//! logs, badges, shifts, contracts, administration, stats).
//!
//! ```no_run
//! use std::sync::Arc;
//! use staffdesk_client::api::{auth, employees, ApiClient};
//! use staffdesk_client::session::KeychainStore;
//!
//! # async fn run() -> Result<(), staffdesk_client::api::ApiError> {
//! let client = ApiClient::new("https://staffdesk.example.com", Arc::new(KeychainStore::new()));
//! auth::login(&client, "admin", "secret").await?;
//! let everyone = employees::list(&client).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod events;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use events::{SessionEvent, SessionEvents};
pub use session::{Session, SessionStore, UserProfile};
