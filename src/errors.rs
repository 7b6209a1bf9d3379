// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the photo capture application

use crate::backends::BackendError;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type for controller commands
pub type CommandResult<T> = Result<T, CommandError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Rejected or ignored controller commands
    Command(CommandError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Device-level capture errors
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// Camera is busy or in use
    Busy,
    /// Camera permission was revoked or never granted
    PermissionDenied,
    /// Capture failed in the device backend
    Failed(String),
}

/// Gallery persistence errors
///
/// The controller never branches on the kind; it only reports it.
#[derive(Debug, Clone)]
pub enum SaveError {
    /// Encoding the image failed
    EncodingFailed(String),
    /// Writing to the photo store failed
    WriteFailed(String),
}

/// Commands the controller refused to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Save requested while no captured image is pending review
    NoImageToSave,
    /// Capture requested while another capture is still in flight
    CaptureInProgress,
    /// Save requested while another save is still in flight
    SaveInProgress,
    /// Controller has been disposed
    Disposed,
    /// Command is not available in the current screen state
    NotAvailable(&'static str),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Command(e) => write!(f, "Command ignored: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Busy => write!(f, "Camera is busy"),
            CaptureError::PermissionDenied => write!(f, "Camera permission denied"),
            CaptureError::Failed(msg) => write!(f, "Capture failed: {}", msg),
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            SaveError::WriteFailed(msg) => write!(f, "Write failed: {}", msg),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NoImageToSave => write!(f, "No captured image to save"),
            CommandError::CaptureInProgress => write!(f, "A capture is already in progress"),
            CommandError::SaveInProgress => write!(f, "A save is already in progress"),
            CommandError::Disposed => write!(f, "Controller has been disposed"),
            CommandError::NotAvailable(what) => write!(f, "{} is not available right now", what),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for SaveError {}
impl std::error::Error for CommandError {}

// Conversions from sub-errors to AppError
impl From<CommandError> for AppError {
    fn from(err: CommandError) -> Self {
        AppError::Command(err)
    }
}

impl From<BackendError> for CaptureError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Busy => CaptureError::Busy,
            BackendError::PermissionDenied => CaptureError::PermissionDenied,
            other => CaptureError::Failed(other.to_string()),
        }
    }
}

impl From<BackendError> for SaveError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Encoding(msg) => SaveError::EncodingFailed(msg),
            other => SaveError::WriteFailed(other.to_string()),
        }
    }
}

// Conversions for I/O errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_busy_maps_to_capture_busy() {
        let err: CaptureError = BackendError::Busy.into();
        assert!(matches!(err, CaptureError::Busy));
    }

    #[test]
    fn test_backend_encoding_maps_to_save_encoding() {
        let err: SaveError = BackendError::Encoding("bad pixels".into()).into();
        assert!(matches!(err, SaveError::EncodingFailed(ref m) if m == "bad pixels"));
    }

    #[test]
    fn test_command_error_display() {
        let err = AppError::from(CommandError::NoImageToSave);
        assert_eq!(err.to_string(), "Command ignored: No captured image to save");
    }
}
