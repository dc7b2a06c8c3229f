//! Stored BIN record and its mapping to lookup results.

use chrono::{DateTime, Utc};

use crate::domain::{Country, LookupResult};

/// A row of the `binbase` table.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BinRecord {
    /// Surrogate key
    pub id: i32,
    /// The BIN itself (unique)
    pub bin: i32,
    /// Card scheme
    pub brand: Option<String>,
    /// Issuing bank
    pub bank: Option<String>,
    /// Card type
    #[sqlx(rename = "type")]
    pub card_type: Option<String>,
    /// Card tier
    pub level: Option<String>,
    /// Country name
    pub isocountry: Option<String>,
    pub isoa2: Option<String>,
    pub isoa3: Option<String>,
    pub isonumber: Option<i32>,
    /// Issuer website. Legacy column, never written here.
    pub www: Option<String>,
    /// Issuer phone. Legacy column, never written here.
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BinRecord {
    /// Map the stored fields to a lookup result.
    ///
    /// No Luhn flag is stored, so `luhn` is always `Some(true)` for records
    /// read back from the store.
    // FIXME: this reports every cached BIN as Luhn-valid; a real flag needs a
    // `luhn` column populated from the provider.
    pub fn to_lookup_result(&self) -> LookupResult {
        LookupResult {
            scheme: self.brand.clone(),
            card_type: self.card_type.clone(),
            issuer: self.bank.clone(),
            tier: self.level.clone(),
            country: Some(Country {
                iso_a2: self.isoa2.clone(),
                iso_a3: self.isoa3.clone(),
                iso_country: self.isocountry.clone(),
                iso_number: self.isonumber,
            }),
            luhn: Some(true),
        }
    }

    /// The writable columns of this record.
    pub fn fields(&self) -> BinFields {
        BinFields {
            brand: self.brand.clone(),
            bank: self.bank.clone(),
            card_type: self.card_type.clone(),
            level: self.level.clone(),
            isocountry: self.isocountry.clone(),
            isoa2: self.isoa2.clone(),
            isoa3: self.isoa3.clone(),
            isonumber: self.isonumber,
        }
    }
}

/// The columns written on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinFields {
    pub brand: Option<String>,
    pub bank: Option<String>,
    pub card_type: Option<String>,
    pub level: Option<String>,
    pub isocountry: Option<String>,
    pub isoa2: Option<String>,
    pub isoa3: Option<String>,
    pub isonumber: Option<i32>,
}

impl BinFields {
    /// Columns for a new record, taken verbatim from `result`.
    pub fn from_result(result: &LookupResult) -> Self {
        let country = result.country.as_ref();
        Self {
            brand: result.scheme.clone(),
            bank: result.issuer.clone(),
            card_type: result.card_type.clone(),
            level: result.tier.clone(),
            isocountry: country.and_then(|c| c.iso_country.clone()),
            isoa2: country.and_then(|c| c.iso_a2.clone()),
            isoa3: country.and_then(|c| c.iso_a3.clone()),
            isonumber: country.and_then(|c| c.iso_number),
        }
    }

    /// Columns for refreshing `existing` from `result`.
    ///
    /// Each field takes the new value when `result` provides one and keeps
    /// the stored value otherwise. Empty strings and a zero country code
    /// count as not provided.
    pub fn merged(existing: &BinRecord, result: &LookupResult) -> Self {
        let new = Self::from_result(result);
        Self {
            brand: pick_text(new.brand, &existing.brand),
            bank: pick_text(new.bank, &existing.bank),
            card_type: pick_text(new.card_type, &existing.card_type),
            level: pick_text(new.level, &existing.level),
            isocountry: pick_text(new.isocountry, &existing.isocountry),
            isoa2: pick_text(new.isoa2, &existing.isoa2),
            isoa3: pick_text(new.isoa3, &existing.isoa3),
            isonumber: new.isonumber.filter(|n| *n != 0).or(existing.isonumber),
        }
    }
}

fn pick_text(new: Option<String>, old: &Option<String>) -> Option<String> {
    new.filter(|s| !s.is_empty()).or_else(|| old.clone())
}
