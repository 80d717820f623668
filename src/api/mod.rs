//! HTTP client for the remote MIS API
//!
//! This module provides:
//! - Typed endpoint wrappers over `reqwest` with bearer-token attachment
//! - The persisted login session with an explicit lifecycle
//! - Error categorization (transport, non-2xx, client-side validation)

pub mod client;
pub mod dto;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use error::ApiError;
pub use session::{Session, SessionStore};
