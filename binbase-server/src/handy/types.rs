//! HandyAPI response DTOs.
//!
//! These types map directly to the HandyAPI JSON response. Every field is
//! optional because the provider omits fields it has no data for.

use serde::Deserialize;

/// Provider status value reporting an unknown BIN.
pub const STATUS_NOT_FOUND: &str = "NOT FOUND";

/// Response from `GET /bin/{bin}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HandyResponse {
    /// "SUCCESS" or "NOT FOUND".
    pub status: Option<String>,

    /// Card network (e.g. "VISA").
    pub scheme: Option<String>,

    /// Card type (e.g. "CREDIT").
    #[serde(rename = "Type")]
    pub card_type: Option<String>,

    /// Issuing bank name.
    pub issuer: Option<String>,

    /// Card tier (e.g. "PLATINUM").
    pub card_tier: Option<String>,

    /// Issuing country.
    pub country: Option<HandyCountry>,

    /// Luhn flag. Usually a boolean, but kept loose so that odd encodings
    /// are coerced rather than failing the whole response.
    pub luhn: Option<serde_json::Value>,
}

impl HandyResponse {
    /// Whether the provider reported the BIN as unknown.
    pub fn is_not_found(&self) -> bool {
        self.status.as_deref() == Some(STATUS_NOT_FOUND)
    }
}

/// Country block of a HandyAPI response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HandyCountry {
    /// ISO alpha-2 code.
    #[serde(rename = "A2")]
    pub a2: Option<String>,

    /// ISO alpha-3 code.
    #[serde(rename = "A3")]
    pub a3: Option<String>,

    /// ISO numeric code. Normally a string (e.g. "840"), but a bare number
    /// is accepted too.
    #[serde(rename = "N3")]
    pub n3: Option<serde_json::Value>,

    /// International dialling code.
    #[serde(rename = "ISD")]
    pub isd: Option<String>,

    /// Country name.
    #[serde(rename = "Name")]
    pub name: Option<String>,

    /// Continent.
    #[serde(rename = "Cont")]
    pub cont: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Status": "SUCCESS",
        "Scheme": "VISA",
        "Type": "DEBIT",
        "Issuer": "JPMORGAN CHASE BANK N.A.",
        "CardTier": "CLASSIC",
        "Country": {
            "A2": "US",
            "A3": "USA",
            "N3": "840",
            "ISD": "1",
            "Name": "United States of America",
            "Cont": "North America"
        },
        "Luhn": true
    }"#;

    #[test]
    fn deserialize_success() {
        let resp: HandyResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(resp.status.as_deref(), Some("SUCCESS"));
        assert_eq!(resp.scheme.as_deref(), Some("VISA"));
        assert_eq!(resp.card_type.as_deref(), Some("DEBIT"));
        assert_eq!(resp.card_tier.as_deref(), Some("CLASSIC"));
        let country = resp.country.unwrap();
        assert_eq!(country.a2.as_deref(), Some("US"));
        assert_eq!(country.n3, Some(serde_json::Value::from("840")));
        assert_eq!(country.cont.as_deref(), Some("North America"));
        assert_eq!(resp.luhn, Some(serde_json::Value::Bool(true)));
    }

    #[test]
    fn deserialize_not_found() {
        let resp: HandyResponse = serde_json::from_str(r#"{"Status": "NOT FOUND"}"#).unwrap();
        assert!(resp.is_not_found());
        assert!(resp.scheme.is_none());
        assert!(resp.country.is_none());
    }

    #[test]
    fn numeric_country_code_deserializes() {
        let resp: HandyResponse =
            serde_json::from_str(r#"{"Status": "SUCCESS", "Country": {"A2": "US", "N3": 840}}"#)
                .unwrap();
        assert_eq!(resp.country.unwrap().n3, Some(serde_json::Value::from(840)));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let resp: HandyResponse =
            serde_json::from_str(r#"{"Status": "SUCCESS", "Extra": 1}"#).unwrap();
        assert!(!resp.is_not_found());
    }
}
