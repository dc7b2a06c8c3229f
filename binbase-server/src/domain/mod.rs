//! Core domain types for BIN lookup.

mod bin;
mod error;
mod lookup;

pub use bin::{Bin, MAX_BIN, MIN_BIN};
pub use error::DomainError;
pub use lookup::{Country, LookupResult};
