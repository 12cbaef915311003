use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use rust_decimal::Decimal;

/// High-precision decimal type that preserves original string representation.
///
/// FHIR requires that decimal values maintain their original precision and format
/// when serialized back to JSON. This type stores both the parsed `Decimal` value
/// for mathematical operations and the original string for serialization.
///
/// # FHIR Precision Requirements
///
/// FHIR decimal values must:
/// - Preserve trailing zeros (e.g., "12.340" vs "12.34")
/// - Keep the leading sign and any exponent exactly as written
/// - Never pass through a binary floating point type
///
/// # Examples
///
/// ```rust
/// use atrius_fhir_lib::PreciseDecimal;
/// use rust_decimal::Decimal;
///
/// // Create from Decimal (derives string representation)
/// let precise = PreciseDecimal::from(Decimal::new(12340, 3)); // 12.340
/// assert_eq!(precise.original_string(), "12.340");
///
/// // Parse keeps the text verbatim
/// let precise: PreciseDecimal = "0.14285700000".parse().unwrap();
/// assert_eq!(precise.original_string(), "0.14285700000");
/// ```
#[derive(Debug, Clone)]
pub struct PreciseDecimal {
    /// The parsed decimal value, `None` if parsing failed (e.g., out of range)
    value: Option<Decimal>,
    /// The original string representation preserving format and precision
    original_string: Arc<str>,
}

/// Equality compares the original text.
///
/// `"10.0"` and `"10.00"` are different FHIR decimals: they carry different
/// precision and serialize differently. Use [`PreciseDecimal::value`] for
/// numeric comparison.
impl PartialEq for PreciseDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.original_string == other.original_string
    }
}

impl Eq for PreciseDecimal {}

impl std::hash::Hash for PreciseDecimal {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.original_string.hash(state);
    }
}

impl Default for PreciseDecimal {
    fn default() -> Self {
        Self::from(Decimal::ZERO)
    }
}

// === PreciseDecimal Methods ===

impl PreciseDecimal {
    /// Creates a new `PreciseDecimal` from its constituent parts.
    ///
    /// This constructor allows explicit control over both the parsed value and the
    /// original string representation. Use this when you need to preserve a specific
    /// string format or when parsing has already been attempted.
    ///
    /// # Arguments
    ///
    /// * `value` - The parsed decimal value, or `None` if parsing failed
    /// * `original_string` - The original string representation to preserve
    pub fn from_parts(value: Option<Decimal>, original_string: String) -> Self {
        Self {
            value,
            original_string: Arc::from(original_string.as_str()),
        }
    }

    /// Wraps decimal text, keeping it verbatim.
    ///
    /// The numeric value is filled in when `rust_decimal` can represent it.
    /// Values outside its range (e.g. `1e400`) keep only their text. The text
    /// itself is not grammar-checked here; the JSON codec does that.
    pub fn from_text(text: &str) -> Self {
        Self {
            value: Self::parse_decimal_string(text),
            original_string: Arc::from(text),
        }
    }

    /// Helper method to parse a decimal string with support for scientific notation.
    ///
    /// Normalizes 'E' to 'e' before parsing while the original string is kept
    /// as-is for serialization.
    fn parse_decimal_string(s: &str) -> Option<Decimal> {
        let normalized = s.replace('E', "e");

        if normalized.contains('e') {
            Decimal::from_scientific(&normalized).ok()
        } else {
            normalized.parse::<Decimal>().ok()
        }
    }

    /// Returns the parsed decimal value if parsing was successful.
    ///
    /// ```rust
    /// use atrius_fhir_lib::PreciseDecimal;
    /// use rust_decimal::Decimal;
    ///
    /// let precise = PreciseDecimal::from(Decimal::new(1234, 2)); // 12.34
    /// assert_eq!(precise.value(), Some(Decimal::new(1234, 2)));
    ///
    /// let invalid = PreciseDecimal::from_parts(None, "invalid".to_string());
    /// assert_eq!(invalid.value(), None);
    /// ```
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Returns the original string representation.
    ///
    /// This is the exact text emitted on serialization.
    pub fn original_string(&self) -> &str {
        &self.original_string
    }
}

/// Converts a `Decimal` to `PreciseDecimal` with derived string representation.
impl From<Decimal> for PreciseDecimal {
    fn from(value: Decimal) -> Self {
        let original_string = Arc::from(value.to_string());
        Self {
            value: Some(value),
            original_string,
        }
    }
}

/// Parses decimal text. Fails only when the text is not a number at all.
impl FromStr for PreciseDecimal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim_start_matches('-');
        let looks_numeric = trimmed.starts_with(|c: char| c.is_ascii_digit())
            && s.chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
        if !looks_numeric {
            return Err(format!("Invalid FHIR decimal format: {}", s));
        }
        Ok(Self::from_text(s))
    }
}

impl fmt::Display for PreciseDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_text_is_preserved() {
        for text in ["2.71828", "-3.14159", "0.000", "0.14285700000", "42", "1.5E3"] {
            let decimal: PreciseDecimal = text.parse().unwrap();
            assert_eq!(decimal.original_string(), text);
            assert_eq!(decimal.to_string(), text);
        }
    }

    #[test]
    fn test_value_is_parsed() {
        let decimal: PreciseDecimal = "0.000".parse().unwrap();
        assert_eq!(decimal.value(), Some(dec!(0.000)));

        let scientific = PreciseDecimal::from_text("1.5E3");
        assert_eq!(scientific.value(), Some(dec!(1500)));
    }

    #[test]
    fn test_equality_uses_text() {
        let a = PreciseDecimal::from_text("10.0");
        let b = PreciseDecimal::from_text("10.00");
        assert_ne!(a, b);
        assert_eq!(a.value(), b.value());
    }

    #[test]
    fn test_out_of_range_keeps_text() {
        let huge = PreciseDecimal::from_text("1e400");
        assert_eq!(huge.value(), None);
        assert_eq!(huge.original_string(), "1e400");
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert!("abc".parse::<PreciseDecimal>().is_err());
        assert!("".parse::<PreciseDecimal>().is_err());
    }
}
