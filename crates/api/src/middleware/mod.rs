//! Request extractors guarding the admin surface.
//!
//! - [`admin::RequireAdmin`] -- Requires the configured admin bearer token.

pub mod admin;
