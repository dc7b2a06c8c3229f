//! Web layer for the BIN lookup service.
//!
//! Provides the JSON lookup endpoint and the HTML lookup page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
