//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::LookupResult;

/// BIN used in the page's usage examples.
pub const EXAMPLE_BIN: &str = "457173";

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Lookup page: form, optional result or error, and API usage examples.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// BIN echoed back into the form
    pub bin: String,
    pub result: Option<LookupView>,
    pub error: Option<String>,
    /// Absolute URL of the example API request
    pub example_url: String,
}

impl IndexTemplate {
    /// Empty form.
    pub fn new(api_base: &str) -> Self {
        Self {
            bin: String::new(),
            result: None,
            error: None,
            example_url: format!("{api_base}/api/{EXAMPLE_BIN}"),
        }
    }

    /// Echo the submitted BIN.
    pub fn with_bin(mut self, bin: impl Into<String>) -> Self {
        self.bin = bin.into();
        self
    }

    /// Show a lookup result.
    pub fn with_result(mut self, result: &LookupResult) -> Self {
        self.result = Some(LookupView::from_result(result));
        self
    }

    /// Show an error message.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Lookup result view model for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupView {
    pub scheme: String,
    pub card_type: String,
    pub issuer: String,
    pub tier: String,
    pub country: String,
    pub country_codes: String,
    pub luhn: String,
}

impl LookupView {
    /// Create from a lookup result, filling gaps with "N/A".
    pub fn from_result(result: &LookupResult) -> Self {
        let country = result.country.clone().unwrap_or_default();
        let codes: Vec<String> = [
            country.iso_a2,
            country.iso_a3,
            country.iso_number.map(|n| format!("{n:03}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            scheme: or_na(&result.scheme),
            card_type: or_na(&result.card_type),
            issuer: or_na(&result.issuer),
            tier: or_na(&result.tier),
            country: or_na(&country.iso_country),
            country_codes: codes.join(" / "),
            luhn: if result.luhn == Some(true) { "Yes" } else { "N/A" }.to_string(),
        }
    }

    /// Whether there are any country codes to show.
    pub fn has_country_codes(&self) -> bool {
        !self.country_codes.is_empty()
    }
}

fn or_na(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Country;

    fn result() -> LookupResult {
        LookupResult {
            scheme: Some("VISA".into()),
            card_type: Some("DEBIT".into()),
            issuer: None,
            tier: Some(String::new()),
            country: Some(Country {
                iso_a2: Some("AU".into()),
                iso_a3: Some("AUS".into()),
                iso_country: Some("Australia".into()),
                iso_number: Some(36),
            }),
            luhn: Some(true),
        }
    }

    #[test]
    fn view_fills_missing_fields() {
        let view = LookupView::from_result(&result());
        assert_eq!(view.scheme, "VISA");
        assert_eq!(view.issuer, "N/A");
        assert_eq!(view.tier, "N/A");
        assert_eq!(view.country, "Australia");
        assert_eq!(view.country_codes, "AU / AUS / 036");
        assert_eq!(view.luhn, "Yes");
    }

    #[test]
    fn view_without_country() {
        let view = LookupView::from_result(&LookupResult::default());
        assert_eq!(view.country, "N/A");
        assert!(!view.has_country_codes());
        assert_eq!(view.luhn, "N/A");
    }

    #[test]
    fn index_renders_form_and_examples() {
        let html = IndexTemplate::new("http://localhost:3000").render().unwrap();
        assert!(html.contains("<form"));
        // Askama escapes '/', so match on the host and the example BIN.
        assert!(html.contains("localhost:3000"));
        assert!(html.contains(EXAMPLE_BIN));
        assert!(!html.contains("BIN Information"));
    }

    #[test]
    fn index_renders_result() {
        let html = IndexTemplate::new("http://localhost:3000")
            .with_bin("457173")
            .with_result(&result())
            .render()
            .unwrap();
        assert!(html.contains("BIN Information"));
        assert!(html.contains("Australia"));
        assert!(html.contains("value=\"457173\""));
    }

    #[test]
    fn index_renders_error_escaped() {
        let html = IndexTemplate::new("http://localhost:3000")
            .with_error("<b>bad</b>")
            .render()
            .unwrap();
        assert!(html.contains("&lt;b&gt;bad"));
        assert!(!html.contains("<b>bad"));
    }
}
