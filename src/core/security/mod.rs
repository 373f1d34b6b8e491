//! Security module for request authentication.
//!
//! This module provides the bearer-token gate that every protected endpoint
//! passes through before any tool is dispatched.

pub mod auth;

pub use auth::{AuthError, AuthGate, Authenticated};
