//! Request extractors that gate handlers.
//!
//! - [`auth::AdminUser`] -- requires a valid admin JWT Bearer token.

pub mod auth;
