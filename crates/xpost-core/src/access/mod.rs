//! ============================================================================
//! Access Module - Password-gated sessions
//! ============================================================================
//! A session starts locked, unlocks on the shared password, locks on logout.
//!
//! ## Usage
//! ```rust,ignore
//! use xpost_core::{AccessGate, Session};
//!
//! let gate = AccessGate::new(secrets.app_password()?)?;
//! let mut session = Session::new();
//! gate.unlock(&mut session, &submitted)?;
//! ```
//! ============================================================================

mod gate;

pub use gate::AccessGate;
