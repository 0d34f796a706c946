use actix_web::{http::StatusCode, HttpResponse};
use reminder_scheduler_api_structs::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("Notifications are disabled. Error message: `{0}`")]
    PreferenceDisabled(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("Reminder sweep failed. Error message: `{0}`")]
    SweepFailed(String),
}

impl actix_web::error::ResponseError for SchedulerError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PreferenceDisabled(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::SweepFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
