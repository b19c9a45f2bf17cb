use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeadlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown report kind: {0} (expected 'funnel' or 'bookings')")]
    UnknownReportKind(String),

    #[error("An entity named '{0}' already exists")]
    DuplicateEntity(String),

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, LeadlineError>;
