//! BIN lookup result shapes.
//!
//! These are the transient values returned to callers. Field names match the
//! JSON served by the API; absent values serialise as `null`.

use serde::{Deserialize, Serialize};

/// Issuing country of a BIN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (e.g. "US")
    pub iso_a2: Option<String>,

    /// ISO 3166-1 alpha-3 code (e.g. "USA")
    pub iso_a3: Option<String>,

    /// Country name
    pub iso_country: Option<String>,

    /// ISO 3166-1 numeric code (e.g. 840)
    pub iso_number: Option<i32>,
}

/// Metadata about a BIN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Card scheme / network (e.g. "VISA")
    pub scheme: Option<String>,

    /// Card type (e.g. "CREDIT", "DEBIT")
    #[serde(rename = "type")]
    pub card_type: Option<String>,

    /// Issuing bank
    pub issuer: Option<String>,

    /// Card tier / level (e.g. "CLASSIC", "PLATINUM")
    pub tier: Option<String>,

    /// Issuing country
    pub country: Option<Country>,

    /// Whether the record passed Luhn validation at the source.
    /// Carried through, never computed here.
    pub luhn: Option<bool>,
}
