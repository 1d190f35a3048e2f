//! Error conversions into [`AppError`] and the HTTP response mapping.

use super::app_error::AppError;
use super::kind::ErrorKind;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {err}")).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                let app_err = match db_err.code().as_deref() {
                    Some(code) => postgres_code_error(code),
                    None => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

/// Map a SQLSTATE to its HTTP-facing error.
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
fn postgres_code_error(code: &str) -> AppError {
    match code {
        // Integrity constraint violations (class 23)
        "23000" => AppError::conflict("Integrity constraint violation"),
        "23502" => AppError::bad_request("Required field is null"),
        "23503" => AppError::conflict("Foreign key violation"),
        "23505" => AppError::conflict("Duplicate key value"),
        "23514" => AppError::bad_request("Check constraint violation"),
        // Privilege failures (class 42)
        "42501" => AppError::forbidden("Insufficient privilege"),
        // Resource exhaustion (class 53)
        "53000" | "53100" | "53200" | "53300" => {
            AppError::service_unavailable("Database resource exhausted")
        }
        // Operator intervention and shutdowns (class 57)
        "57000" | "57014" | "57P01" | "57P02" | "57P03" => {
            AppError::service_unavailable("Database unavailable")
        }
        _ => AppError::internal("Database error"),
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_kinds() {
        let not_found = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(AppError::from(not_found).kind(), ErrorKind::NotFound);

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(AppError::from(denied).kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_json_syntax_error_is_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(AppError::from(err).kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_unique_violation_maps_to_conflict() {
        assert_eq!(postgres_code_error("23505").kind(), ErrorKind::Conflict);
        assert_eq!(
            postgres_code_error("99999").kind(),
            ErrorKind::InternalServerError
        );
    }
}
