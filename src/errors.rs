use crate::util::extractor::Json;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sqlx::error::ErrorKind;
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use validator::ValidationErrors;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Serialize, Debug)]
pub struct ErrorMessage {
    pub code: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    ServerError(String),

    JsonRejection(JsonRejection),
    FormRejection(FormRejection),

    ValidationError(ValidationErrors),

    Sqlx(sqlx::Error),

    Io(std::io::Error),

    Anyhow(anyhow::Error),

    Any(ErrorMessage),
}

impl ApiError {
    fn code(&self) -> u16 {
        use ApiError::*;

        match self {
            BadRequest(_) => 400,
            NotFound(_) => 404,
            JsonRejection(_) | FormRejection(_) | ValidationError(_) => 400,
            ServerError(_) | Sqlx(_) | Io(_) | Anyhow(_) => 500,
            Any(message) => message.code,
        }
    }

    fn reason(&self) -> &str {
        let status_code = StatusCode::from_u16(self.code());
        match status_code {
            Ok(status) => status.canonical_reason().unwrap_or("Unknown error"),
            Err(_e) => "Unknown error",
        }
    }

    fn message(&self) -> Option<String> {
        use ApiError::*;
        match self {
            BadRequest(msg) | NotFound(msg) | ServerError(msg) => Some(msg.clone()),
            JsonRejection(error) => Some(error.body_text()),
            FormRejection(error) => Some(error.body_text()),
            ValidationError(err) => Some(err.to_string().replace('\n', "; ")),
            Sqlx(_) | Io(_) | Anyhow(_) => None,
            Any(msg) => msg.message.clone(),
        }
    }

    fn to_default_json(&self) -> Response {
        self.to_json(self.code(), self.reason(), self.message().as_deref())
    }

    fn to_json(&self, code: u16, error: &str, message: Option<&str>) -> Response {
        (
            StatusCode::from_u16(code).unwrap(),
            Json(ErrorMessage {
                code,
                error: error.to_string(),
                message: message.map(String::from),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use ApiError::*;
        use ErrorKind::*;

        match self {
            Sqlx(ref error) => {
                tracing::error!("sqlx error: {:?}", error);
                match error {
                    sqlx::Error::Database(dbe) if dbe.constraint().is_some() => match dbe.kind() {
                        UniqueViolation => {
                            self.to_json(409, "Conflict", Some("Unique value already in use"))
                        }
                        ForeignKeyViolation => {
                            self.to_json(400, "Bad Request", Some("Missing related record"))
                        }
                        NotNullViolation => {
                            self.to_json(400, "Bad Request", Some("Missing required field"))
                        }
                        _ => self.to_json(400, "Bad Request", Some("Invalid input value")),
                    },
                    sqlx::Error::RowNotFound => {
                        self.to_json(404, "Not Found", Some("Data not found"))
                    }
                    _ => self.to_default_json(),
                }
            }
            Io(ref error) => {
                tracing::error!("io error: {:?}", error);
                self.to_default_json()
            }
            Anyhow(ref error) => {
                tracing::error!("generic error: {:?}", error);
                self.to_default_json()
            }
            _ => self.to_default_json(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.reason())
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use ApiError::*;
        match self {
            JsonRejection(err) => Some(err),
            FormRejection(err) => Some(err),
            ValidationError(err) => Some(err),
            Sqlx(err) => Some(err),
            Io(err) => Some(err),
            Anyhow(err) => err.source(),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Sqlx(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Anyhow(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::JsonRejection(rejection)
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::FormRejection(rejection)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        ApiError::ValidationError(err)
    }
}

pub fn bad_request(msg: &str) -> ApiError {
    ApiError::BadRequest(msg.to_string())
}

#[allow(dead_code)]
pub fn not_found(msg: &str) -> ApiError {
    ApiError::NotFound(msg.to_string())
}

pub fn any_error(code: u16, error: &str, message: Option<&str>) -> ApiError {
    ApiError::Any(ErrorMessage {
        code,
        error: error.to_string(),
        message: message.map(String::from),
    })
}
