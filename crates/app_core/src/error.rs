//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // Degrade to empty results or a notification
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Icon store error: {0}")]
    Store(String),

    #[error("Icon not found: {0}")]
    NotFound(String),

    #[error("Server request failed: {0}")]
    Remote(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    // Startup failures
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

impl AppError {
    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound(icon) => format!("Icon not found: {}", icon),
            AppError::Remote(msg) => format!("Cannot reach the gallery server: {}", msg),
            AppError::Clipboard(msg) => format!("Clipboard unavailable: {}", msg),
            _ => self.to_string(),
        }
    }
}

impl From<app_fs::FsError> for AppError {
    fn from(e: app_fs::FsError) -> Self {
        match e {
            app_fs::FsError::Io(e) => AppError::Io(e),
            app_fs::FsError::NotFound(p) => AppError::NotFound(p),
            _ => AppError::Store(e.to_string()),
        }
    }
}

impl From<app_fs::FileOpError> for AppError {
    fn from(e: app_fs::FileOpError) -> Self {
        match e {
            app_fs::FileOpError::Io(e) => AppError::Io(e),
            app_fs::FileOpError::Clipboard(msg) => AppError::Clipboard(msg),
            app_fs::FileOpError::InvalidName(name) => AppError::NotFound(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::Remote("timeout".into()).user_message(),
            "Cannot reach the gallery server: timeout"
        );
        assert_eq!(AppError::Clipboard("no display".into()).user_message(), "Clipboard unavailable: no display");
        assert_eq!(AppError::Config("bad toml".into()).user_message(), "Configuration error: bad toml");
    }

    #[test]
    fn test_fs_error_conversion() {
        let err: AppError = app_fs::FsError::NotFound("arrows/left".into()).into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.user_message(), "Icon not found: arrows/left");

        let err: AppError = app_fs::FsError::Metadata("bad".into()).into();
        assert!(matches!(err, AppError::Store(_)));
    }
}
