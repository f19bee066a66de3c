use serde_json::Value;
use thiserror::Error;

use crate::types::{Review, ScoredReview};

/// Why a numeric field could not be read
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("field is missing")]
    Missing,
    #[error("field is not numeric: {0}")]
    Invalid(String),
}

/// Read a JSON number or numeric string as `f64`.
///
/// Strings are trimmed first; an empty string counts as missing.
pub fn parse_number(value: Option<&Value>) -> Result<f64, NumberError> {
    match value {
        None | Some(Value::Null) => Err(NumberError::Missing),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| NumberError::Invalid(n.to_string())),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(NumberError::Missing);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| NumberError::Invalid(s.clone()))
        }
        Some(other) => Err(NumberError::Invalid(other.to_string())),
    }
}

impl Review {
    pub fn parsed_points(&self) -> Result<f64, NumberError> {
        parse_number(self.points.as_ref())
    }

    pub fn parsed_price(&self) -> Result<f64, NumberError> {
        parse_number(self.price.as_ref())
    }

    /// Parse both numeric fields, failing on the first one that doesn't parse
    pub fn scored(&self) -> Result<ScoredReview<'_>, NumberError> {
        Ok(ScoredReview {
            review: self,
            points: self.parsed_points()?,
            price: self.parsed_price()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(parse_number(Some(&json!(87))), Ok(87.0));
        assert_eq!(parse_number(Some(&json!(15.5))), Ok(15.5));
        assert_eq!(parse_number(Some(&json!("92"))), Ok(92.0));
        assert_eq!(parse_number(Some(&json!(" 42.25 "))), Ok(42.25));
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(parse_number(None), Err(NumberError::Missing));
        assert_eq!(parse_number(Some(&Value::Null)), Err(NumberError::Missing));
        assert_eq!(parse_number(Some(&json!(""))), Err(NumberError::Missing));
        assert_eq!(parse_number(Some(&json!("   "))), Err(NumberError::Missing));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            parse_number(Some(&json!("eighty"))),
            Err(NumberError::Invalid(_))
        ));
        assert!(matches!(
            parse_number(Some(&json!(true))),
            Err(NumberError::Invalid(_))
        ));
        assert!(matches!(
            parse_number(Some(&json!([1, 2]))),
            Err(NumberError::Invalid(_))
        ));
    }

    #[test]
    fn test_scored_review() {
        let review = Review {
            points: Some(json!("88")),
            price: Some(json!(24)),
            ..Review::default()
        };
        let scored = review.scored().unwrap();
        assert_eq!(scored.points, 88.0);
        assert_eq!(scored.price, 24.0);

        let unpriced = Review {
            points: Some(json!(90)),
            ..Review::default()
        };
        assert_eq!(unpriced.scored().unwrap_err(), NumberError::Missing);
    }
}
