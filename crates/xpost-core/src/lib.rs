//! ============================================================================
//! XPOST-CORE: Password-gated posting to X
//! ============================================================================
//! This crate handles all logic behind the xpost form:
//! - Post URL to post id extraction and quote resolution
//! - Shared-password access gate with constant-time comparison
//! - Config and secrets loading from TOML
//! - Posting gateway over an injectable client (X API v2 + OAuth 1.0a)
//! ============================================================================

pub mod access;
pub mod auth;
pub mod composer;
pub mod config;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod quote;
pub mod types;

// Re-export main types for convenience
pub use access::AccessGate;
pub use composer::Composer;
pub use config::{AppConfig, Credentials, SecretStore};
pub use error::{Result, XpostError};
pub use executor::TwitterExecutor;
pub use gateway::{ApiError, PostingClient, PostingGateway};
pub use quote::{extract_post_id, resolve_quote};
pub use types::*;
