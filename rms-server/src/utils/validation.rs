//! Input validation helpers
//!
//! Payload rules live on the DTOs (`validator` derive in `shared`); these
//! helpers turn failures into [`AppError::Validation`] (400).

use std::str::FromStr;

use shared::ParseEnumError;
use validator::Validate;

use crate::utils::AppError;

/// Run the `validator` rules of a request payload.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(AppError::from)
}

/// Coerce a path segment into an enum (case-insensitive).
pub fn parse_enum<T>(value: &str) -> Result<T, AppError>
where
    T: FromStr<Err = ParseEnumError>,
{
    value.parse::<T>().map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DiningTableCreate, OrderStatus};

    #[test]
    fn test_parse_enum_accepts_any_case() {
        assert_eq!(parse_enum::<OrderStatus>("pending").unwrap(), OrderStatus::Pending);
        assert!(matches!(
            parse_enum::<OrderStatus>("lost"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_payload_rejects_short_passcode() {
        let table = DiningTableCreate {
            name: "T1".into(),
            seat: 4,
            passcode: "123".into(),
            status: None,
        };
        assert!(matches!(
            validate_payload(&table),
            Err(AppError::Validation(_))
        ));
    }
}
