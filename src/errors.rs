use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Errors surfaced by HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Template(askama::Error),
    Csrf,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Csrf => write!(f, "Invalid or missing CSRF token"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => HttpResponse::NotFound().body("Not Found"),
            AppError::Csrf => HttpResponse::Forbidden().body("Invalid or missing CSRF token"),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an Askama template into an HTML response.
pub fn render<T: askama::Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(tmpl.render()?))
}

/// Which unique registration field collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    Email,
    Phone,
    /// A uniqueness constraint fired that the pre-checks did not classify.
    Unspecified,
}

/// Errors returned by the check-in core operations.
///
/// All variants except `Storage` are expected, user-correctable conditions
/// that handlers turn into flash messages. `Storage` is anything the store
/// raised that the core does not classify; callers log it and answer with a
/// generic error. Mutating operations roll back on failure, so the store is
/// exactly as it was before the call.
#[derive(Debug)]
pub enum CheckinError {
    Validation(String),
    NoActiveSession,
    NoLocation,
    OutOfRange { distance_m: f64, radius_m: f64 },
    Duplicate(DuplicateField),
    Storage(rusqlite::Error),
}

impl fmt::Display for CheckinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckinError::Validation(msg) => write!(f, "{msg}"),
            CheckinError::NoActiveSession => write!(f, "No active meeting session"),
            CheckinError::NoLocation => write!(f, "No meeting location set"),
            CheckinError::OutOfRange { distance_m, radius_m } => write!(
                f,
                "You are {distance_m:.1} m from the venue; check-in is allowed within {radius_m:.0} m"
            ),
            CheckinError::Duplicate(DuplicateField::Email) => {
                write!(f, "This email address has already checked in")
            }
            CheckinError::Duplicate(DuplicateField::Phone) => {
                write!(f, "This phone number has already checked in")
            }
            CheckinError::Duplicate(DuplicateField::Unspecified) => {
                write!(f, "This attendee has already checked in")
            }
            CheckinError::Storage(e) => write!(f, "Storage error: {e}"),
        }
    }
}

impl From<rusqlite::Error> for CheckinError {
    fn from(e: rusqlite::Error) -> Self {
        CheckinError::Storage(e)
    }
}
