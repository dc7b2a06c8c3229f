//! HandyAPI BIN data client.
//!
//! This module provides an HTTP client for the HandyAPI BIN lookup service,
//! which is queried when the local `binbase` table has no fresh record.
//!
//! Key characteristics of HandyAPI:
//! - A lookup is a single `GET /bin/{bin}` request
//! - "Not found" is reported in the body (`"Status": "NOT FOUND"`), not via
//!   the HTTP status code
//! - Field names are PascalCase and country codes are nested

mod client;
mod convert;
mod error;
mod types;

pub use client::{HandyClient, HandyConfig};
pub use convert::to_lookup_result;
pub use error::HandyError;
pub use types::{HandyCountry, HandyResponse};
