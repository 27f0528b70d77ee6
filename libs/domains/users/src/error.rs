use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User {0} not found")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The store returned an id that is not an ObjectId. The document was
    /// written; `removed` tells whether the follow-up delete succeeded.
    #[error("Inserted id {orphan_id} is not an ObjectId (orphan removed: {removed})")]
    Encoding { orphan_id: String, removed: bool },

    #[error("Decoding error: {0}")]
    Decoding(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidIdentifier(_) => AppError::InvalidIdentifier(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::Persistence(msg) => AppError::Database(msg),
            UserError::Encoding { .. } => AppError::Encoding(err.to_string()),
            UserError::Decoding(msg) => AppError::Decoding(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::InvalidIdentifier("x".into()), StatusCode::BAD_REQUEST),
            (UserError::Validation("empty".into()), StatusCode::BAD_REQUEST),
            (UserError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (UserError::Persistence("down".into()), StatusCode::BAD_GATEWAY),
            (
                UserError::Encoding {
                    orphan_id: "1".into(),
                    removed: true,
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (UserError::Decoding("email".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_encoding_message_carries_orphan_id() {
        let err = UserError::Encoding {
            orphan_id: "\"abc\"".into(),
            removed: false,
        };
        match AppError::from(err) {
            AppError::Encoding(detail) => {
                assert!(detail.contains("abc"));
                assert!(detail.contains("removed: false"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
