use thiserror::Error;

pub type Result<T = (), E = ToggleError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToggleError {
    #[error("Failed to open network interface root key: {0}")]
    RootUnavailable(String),

    #[error("Failed to query the number of network interface keys: {0}")]
    CountUnavailable(String),

    #[error("Failed to open interface key {entry} for writing: {reason}")]
    WriteAccessDenied { entry: String, reason: String },

    #[error("Registry access is only available on Windows")]
    Unsupported,

    #[error("Failed to restart as administrator: {0}")]
    ElevationFailed(String),
}

impl ToggleError {
    /// Fatal errors mean nothing could be enumerated at all.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::RootUnavailable(_) | Self::CountUnavailable(_) | Self::Unsupported
        )
    }

    /// Message shown to the user in the window or a dialog
    pub fn user_message(&self) -> String {
        match self {
            Self::RootUnavailable(_) => {
                "ReducePing can't find any network interface keys in the registry and can not continue.".to_string()
            }
            Self::CountUnavailable(_) => {
                "ReducePing has encountered an error during querying the amount of sub keys and can not continue.".to_string()
            }
            Self::WriteAccessDenied { .. } => {
                "ReducePing can't write to the registry, make sure that your Windows account has Administrator rights.".to_string()
            }
            Self::Unsupported => "ReducePing only works on Windows.".to_string(),
            Self::ElevationFailed(e) => format!("Could not restart ReducePing as administrator: {}", e),
        }
    }
}
