use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::error::{DbErr, SqlErr};
use serde::Serialize;
use std::borrow::Cow;
use tracing::error;

use crate::ApiResponse;

/// Machine-readable codes carried in the `errors` list of the response envelope.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Referential lookups
    CategoryNotFound,
    SupplierNotFound,
    ProductNotFound,
    WorkScheduleNotFound,
    WorkShiftNotFound,
    ImportingRequestNotFound,
    UserNotFound,

    // Uniqueness
    DuplicatedCategory,
    DuplicatedSupplier,
    DuplicatedProduct,
    DuplicatedWorkSchedule,
    DuplicatedWorkShift,
    DuplicatedWorkAssignment,
    DuplicatedUser,

    // Numeric and temporal bounds
    InvalidProductPrice,
    InvalidProductAvailableQuantity,
    InvalidWorkMonth,
    InvalidWorkYear,
    InvalidWorkShiftTimeRange,
    InvalidImportingQuantity,

    // Lifecycle
    InvalidImportingRequestStatus,

    // Access
    MissingCredentials,
    InvalidToken,
    PermissionDenied,

    InternalServerError,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailure(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(ErrorCode),

    #[error("Business rule violated: {0}")]
    BusinessRule(ErrorCode),

    #[error("Permission denied: {0}")]
    PermissionDenied(ErrorCode),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = err.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);

        let messages = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors
                    .iter()
                    .map(move |e| describe_field_error(field, e))
            })
            .collect();

        ServiceError::ValidationFailure(messages)
    }
}

fn describe_field_error(field: &str, err: &validator::ValidationError) -> String {
    let field = camel_case(field);
    if let Some(message) = &err.message {
        return format!("\"{}\" {}", field, message);
    }
    match err.code.as_ref() {
        "required" => format!("\"{}\" is required", field),
        "length" => match err.params.get("min") {
            Some(min) => format!("\"{}\" must contain at least {} item(s)", field, min),
            None => format!("\"{}\" has an invalid length", field),
        },
        code => format!("\"{}\" is invalid ({})", field, code),
    }
}

/// Request payloads are camelCase on the wire; validator reports Rust field names.
fn camel_case(field: &str) -> Cow<'_, str> {
    if !field.contains('_') {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

impl ServiceError {
    /// Maps a failed insert/update to the business code for a store-level
    /// unique index, or passes the database error through.
    pub fn from_write(err: DbErr, duplicate: ErrorCode) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::BusinessRule(duplicate),
            _ => ServiceError::DatabaseError(err),
        }
    }

    /// The business code, when the error carries one.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::NotFound(code) | Self::BusinessRule(code) | Self::PermissionDenied(code) => {
                Some(*code)
            }
            _ => None,
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailure(_) | Self::BusinessRule(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PermissionDenied(_) => StatusCode::UNAUTHORIZED,
            Self::DatabaseError(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Entries for the envelope's `errors` list. Unexpected failures are opaque.
    pub fn response_errors(&self) -> Vec<String> {
        match self {
            Self::ValidationFailure(messages) => messages.clone(),
            Self::NotFound(code) | Self::BusinessRule(code) | Self::PermissionDenied(code) => {
                vec![code.to_string()]
            }
            Self::DatabaseError(_) | Self::Other(_) => {
                vec![ErrorCode::InternalServerError.to_string()]
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                request_id = crate::tracing::current_request_id()
                    .map(|rid| rid.as_str().to_string())
                    .unwrap_or_default(),
                error = %self,
                "Unhandled failure"
            );
        }

        ApiResponse::<()>::failure(status, self.response_errors()).into_response()
    }
}
