//! API client module for StaffDesk.
//!
//! Provides the authenticated HTTP client with session-backed auth header
//! injection and token refresh, plus typed endpoint bindings and wire types
//! matching the StaffDesk backend API.

pub mod absences;
pub mod access;
pub mod admin;
pub mod auth;
pub mod cards;
pub mod client;
pub mod contracts;
pub mod employees;
pub mod error;
pub mod shifts;
pub mod stats;
pub mod transport;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::ApiClient;
pub use error::ApiError;
