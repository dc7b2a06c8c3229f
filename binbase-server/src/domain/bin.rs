//! Bank identification number type.

use std::fmt;

use super::error::DomainError;

/// Smallest accepted BIN (six digits).
pub const MIN_BIN: u32 = 100_000;

/// Largest accepted BIN (eight digits).
pub const MAX_BIN: u32 = 99_999_999;

/// A validated bank identification number.
///
/// A BIN is the leading 6 to 8 digits of a payment card number. Any `Bin`
/// value lies within `[MIN_BIN, MAX_BIN]` by construction.
///
/// # Examples
///
/// ```
/// use binbase_server::domain::Bin;
///
/// let bin = Bin::parse("457173").unwrap();
/// assert_eq!(bin.value(), 457173);
///
/// // Too short
/// assert!(Bin::parse("12345").is_err());
///
/// // Not a number
/// assert!(Bin::parse("4571ab").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bin(u32);

impl Bin {
    /// Parse a BIN from user input.
    ///
    /// Surrounding whitespace is ignored. The remainder must be a base-10
    /// integer in the accepted range. Exponent, decimal and hex forms such
    /// as `1e5`, `457173.0` or `0x6F9F5` are rejected on purpose.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let value: i64 = s.trim().parse().map_err(|_| DomainError::InvalidBin {
            input: s.to_string(),
            reason: "not an integer",
        })?;

        Self::try_from(value)
    }

    /// Returns the numeric value.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the value as the signed integer stored in the `bin` column.
    pub fn as_i32(self) -> i32 {
        // MAX_BIN is well inside i32 range.
        self.0 as i32
    }
}

impl TryFrom<i64> for Bin {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value < i64::from(MIN_BIN) || value > i64::from(MAX_BIN) {
            return Err(DomainError::InvalidBin {
                input: value.to_string(),
                reason: "must be between 100000 and 99999999",
            });
        }
        Ok(Bin(value as u32))
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bin({})", self.0)
    }
}
