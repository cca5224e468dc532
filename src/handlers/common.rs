use crate::errors::ServiceError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

/// JSON body that has passed the validation gate.
///
/// Malformed JSON or a wrongly typed field is a single-entry validation
/// failure; schema violations list every offending field.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ServiceError::ValidationFailure(vec![rejection.body_text()]))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Unwraps a field the validation gate already marked as required
pub fn required<T>(field: &str, value: Option<T>) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::ValidationFailure(vec![format!("\"{}\" is required", field)]))
}

/// Parses a path identifier
pub fn parse_id(field: &str, raw: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw).map_err(|_| {
        ServiceError::ValidationFailure(vec![format!("\"{}\" must be a valid UUID", field)])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_garbage() {
        let err = parse_id("id", "not-a-uuid").unwrap_err();
        assert_eq!(err.response_errors(), vec!["\"id\" must be a valid UUID"]);
        assert!(parse_id("id", &Uuid::new_v4().to_string()).is_ok());
    }

    #[test]
    fn required_reports_field() {
        let err = required::<i32>("month", None).unwrap_err();
        assert_eq!(err.response_errors(), vec!["\"month\" is required"]);
    }
}
