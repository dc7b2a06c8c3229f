//! Conversion from HandyAPI DTOs to domain lookup results.

use serde_json::Value;

use crate::domain::{Country, LookupResult};

use super::types::{HandyCountry, HandyResponse};

/// Convert a successful provider response into a lookup result.
///
/// The country block is always present in the result, even when the
/// provider sent none; its fields are then all `None`.
pub fn to_lookup_result(resp: &HandyResponse) -> LookupResult {
    let country = resp.country.as_ref().map(convert_country).unwrap_or_default();

    LookupResult {
        scheme: resp.scheme.clone(),
        card_type: resp.card_type.clone(),
        issuer: resp.issuer.clone(),
        tier: resp.card_tier.clone(),
        country: Some(country),
        luhn: Some(resp.luhn.as_ref().is_some_and(truthy)),
    }
}

fn convert_country(c: &HandyCountry) -> Country {
    Country {
        iso_a2: c.a2.clone(),
        iso_a3: c.a3.clone(),
        iso_country: c.name.clone(),
        iso_number: c.n3.as_ref().and_then(parse_numeric_code),
    }
}

/// Parse an ISO numeric country code such as "840", "036" or `840`.
fn parse_numeric_code(v: &Value) -> Option<i32> {
    match v {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    }
}

/// Loose boolean coercion for the Luhn flag.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(luhn: Option<Value>) -> HandyResponse {
        HandyResponse {
            status: Some("SUCCESS".into()),
            scheme: Some("MASTERCARD".into()),
            card_type: Some("CREDIT".into()),
            issuer: Some("BARCLAYS BANK PLC".into()),
            card_tier: Some("WORLD".into()),
            country: Some(HandyCountry {
                a2: Some("GB".into()),
                a3: Some("GBR".into()),
                n3: Some(json!("826")),
                isd: Some("44".into()),
                name: Some("United Kingdom".into()),
                cont: Some("Europe".into()),
            }),
            luhn,
        }
    }

    #[test]
    fn maps_all_fields() {
        let result = to_lookup_result(&response(Some(json!(true))));

        assert_eq!(result.scheme.as_deref(), Some("MASTERCARD"));
        assert_eq!(result.card_type.as_deref(), Some("CREDIT"));
        assert_eq!(result.issuer.as_deref(), Some("BARCLAYS BANK PLC"));
        assert_eq!(result.tier.as_deref(), Some("WORLD"));
        assert_eq!(result.luhn, Some(true));
        assert_eq!(
            result.country,
            Some(Country {
                iso_a2: Some("GB".into()),
                iso_a3: Some("GBR".into()),
                iso_country: Some("United Kingdom".into()),
                iso_number: Some(826),
            })
        );
    }

    #[test]
    fn missing_country_yields_empty_block() {
        let mut resp = response(Some(json!(true)));
        resp.country = None;

        let result = to_lookup_result(&resp);
        assert_eq!(result.country, Some(Country::default()));
    }

    #[test]
    fn non_numeric_country_code_is_dropped() {
        let mut resp = response(None);
        if let Some(c) = resp.country.as_mut() {
            c.n3 = Some(json!("n/a"));
        }

        let result = to_lookup_result(&resp);
        assert_eq!(result.country.unwrap().iso_number, None);
    }

    #[test]
    fn leading_zero_country_code() {
        let mut resp = response(None);
        if let Some(c) = resp.country.as_mut() {
            c.n3 = Some(json!("036"));
        }

        assert_eq!(to_lookup_result(&resp).country.unwrap().iso_number, Some(36));
    }

    #[test]
    fn numeric_country_code_accepted_as_number() {
        let mut resp = response(None);
        if let Some(c) = resp.country.as_mut() {
            c.n3 = Some(json!(826));
        }
        assert_eq!(to_lookup_result(&resp).country.unwrap().iso_number, Some(826));

        if let Some(c) = resp.country.as_mut() {
            c.n3 = Some(json!(true));
        }
        assert_eq!(to_lookup_result(&resp).country.unwrap().iso_number, None);
    }

    #[test]
    fn luhn_coercion() {
        assert_eq!(to_lookup_result(&response(None)).luhn, Some(false));
        assert_eq!(to_lookup_result(&response(Some(json!(false)))).luhn, Some(false));
        assert_eq!(to_lookup_result(&response(Some(json!(1)))).luhn, Some(true));
        assert_eq!(to_lookup_result(&response(Some(json!(0)))).luhn, Some(false));
        assert_eq!(to_lookup_result(&response(Some(json!("yes")))).luhn, Some(true));
        assert_eq!(to_lookup_result(&response(Some(json!("")))).luhn, Some(false));
        assert_eq!(to_lookup_result(&response(Some(Value::Null))).luhn, Some(false));
    }
}
