use thiserror::Error;

use crate::app::services::export::ExportError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Preview error: {0}")]
    Preview(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_export_error_conversion() {
        let app_err: AppError = ExportError::ArchiverUnavailable.into();
        assert!(matches!(app_err, AppError::Export(ExportError::ArchiverUnavailable)));
        assert_eq!(
            app_err.to_string(),
            "Export error: archive support is not available in this build"
        );
    }

    #[test]
    fn test_error_display() {
        let err = AppError::Settings("invalid font size".to_string());
        assert_eq!(err.to_string(), "Settings error: invalid font size");

        let err = AppError::Session("corrupt session file".to_string());
        assert_eq!(err.to_string(), "Session error: corrupt session file");

        let err = AppError::Preview("no browser".to_string());
        assert_eq!(err.to_string(), "Preview error: no browser");
    }
}
