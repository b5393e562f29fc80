//! Business logic services.
//!
//! - `auth` - Registration, password login and bearer tokens
//! - `api_keys` - Issuing, revoking and verifying API keys
//! - `secret` - Random secrets and their stored digests

pub mod api_keys;
pub mod auth;
pub mod secret;

pub use api_keys::ApiKeyService;
pub use auth::{AuthError, AuthService, Credentials, LoginSession};
