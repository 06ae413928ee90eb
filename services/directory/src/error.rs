use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Directory service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("email {email} is already registered to {owner}")]
    DuplicateEmail { email: String, owner: String },
    #[error("phone {phone} is already registered to {owner}")]
    DuplicatePhone { phone: String, owner: String },
    #[error("username {username} is already taken")]
    DuplicateUsername { username: String },
    #[error("forbidden")]
    Forbidden,
    #[error("provider not found")]
    ProviderNotFound,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl DirectoryServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
            Self::DuplicatePhone { .. } => "DUPLICATE_PHONE",
            Self::DuplicateUsername { .. } => "DUPLICATE_USERNAME",
            Self::Forbidden => "FORBIDDEN",
            Self::ProviderNotFound => "PROVIDER_NOT_FOUND",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DuplicateEmail { .. }
            | Self::DuplicatePhone { .. }
            | Self::DuplicateUsername { .. } => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ProviderNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DirectoryServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only; TraceLayer records method, uri and status for every request.
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            if cfg!(debug_assertions) {
                body["details"] = serde_json::Value::String(format!("{e:#}"));
            }
        }
        (status, axum::Json(body)).into_response()
    }
}
