//! Error handling module for kickstart-tui
//!
//! Every recoverable failure the operator can trigger (bad hostname, no disk,
//! partition budget exceeded, password problems) has its own variant so the
//! TUI can show a precise notice and let the operator retry.

use thiserror::Error;

/// Main error type for kickstart-tui
#[derive(Error, Debug)]
pub enum KickstartError {
    /// Profile identifier not present in the catalog
    #[error("Unknown system profile: {0}")]
    UnknownProfile(String),

    /// Hostname does not match `^[a-zA-Z0-9\-.]{1,100}$`
    #[error("Invalid Hostname: {0:?}")]
    InvalidHostname(String),

    /// Every disk was left unselected
    #[error("Please select at least one install disk!")]
    NoDiskSelected,

    /// LVM percentages sum past the volume group
    #[error("Verify that LVM configuration is not over 100%! (currently {0}%)")]
    Overbudget(u32),

    /// The two password entries differ
    #[error("Passwords Don't Match!")]
    PasswordMismatch,

    /// Password shorter than the required minimum
    #[error("Password too short! {required} Characters Required.")]
    PasswordTooShort { required: usize },

    /// Static network address that is not a usable IPv4 dotted quad
    #[error("Invalid IP address: {0:?}")]
    InvalidAddress(String),

    /// A volume percentage outside the range the form allows
    #[error("{volume} must be between {min}% and {max}% (got {value}%)")]
    VolumeOutOfRange {
        volume: String,
        value: u8,
        min: u8,
        max: u8,
    },

    /// Password hashing failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// IO errors (artifact writes, terminal, /proc reads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for kickstart-tui operations
pub type Result<T> = std::result::Result<T, KickstartError>;

impl KickstartError {
    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a credential error
    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential(msg.into())
    }

    /// True for the errors the operator can fix from the form.
    ///
    /// Anything else (IO, terminal) is an environment problem.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownProfile(_)
                | Self::InvalidHostname(_)
                | Self::NoDiskSelected
                | Self::Overbudget(_)
                | Self::PasswordMismatch
                | Self::PasswordTooShort { .. }
                | Self::InvalidAddress(_)
                | Self::VolumeOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KickstartError::Overbudget(105);
        assert_eq!(
            err.to_string(),
            "Verify that LVM configuration is not over 100%! (currently 105%)"
        );

        let err = KickstartError::PasswordTooShort { required: 15 };
        assert_eq!(err.to_string(), "Password too short! 15 Characters Required.");

        let err = KickstartError::UnknownProfile("kiosk".into());
        assert_eq!(err.to_string(), "Unknown system profile: kiosk");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KickstartError = io_err.into();
        assert!(matches!(err, KickstartError::Io(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_input_errors_are_recoverable() {
        assert!(KickstartError::NoDiskSelected.is_input_error());
        assert!(KickstartError::PasswordMismatch.is_input_error());
        assert!(KickstartError::InvalidHostname("a_b".into()).is_input_error());
        assert!(!KickstartError::terminal("no tty").is_input_error());
    }
}
