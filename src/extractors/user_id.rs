//! Extract the integer `{id}` path parameter, rejecting with a validation issue.

use crate::error::AppError;
use crate::validation::ValidationError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

pub const ID_PARAM: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserId(pub i64);

impl UserId {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        raw.trim()
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| ValidationError::invalid_id(ID_PARAM))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ValidationError::invalid_id(ID_PARAM))?;
        Ok(UserId::parse(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_only() {
        assert_eq!(UserId::parse("42").unwrap(), UserId(42));
        assert_eq!(UserId::parse(" 7 ").unwrap(), UserId(7));
        assert!(UserId::parse("wat").is_err());
        assert!(UserId::parse("1.5").is_err());
        assert!(UserId::parse("").is_err());
    }

    #[test]
    fn rejects_exponents_and_out_of_range_ids() {
        assert!(UserId::parse("1e2").is_err());
        assert!(UserId::parse("99999999999999999999").is_err());
        assert_eq!(UserId::parse("9223372036854775807").unwrap(), UserId(i64::MAX));
    }
}
