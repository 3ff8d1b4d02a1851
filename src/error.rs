use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Host-surface errors. The tree core itself never fails — bad paths and
/// unreadable directories degrade to empty results — so these only cover
/// the terminal and the CLI boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from terminal setup and drawing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal lifecycle errors (raw mode, event channel).
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// The root path given on the command line does not exist.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts_and_displays() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn terminal_and_path_errors_display() {
        assert_eq!(
            AppError::Terminal("channel closed".into()).to_string(),
            "Terminal error: channel closed"
        );
        assert_eq!(
            AppError::InvalidPath("/missing".into()).to_string(),
            "Invalid path: /missing"
        );
    }
}
