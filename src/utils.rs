use crate::error::{Result, ToggleError};
use crate::toggle::ConfigToggle;

/// Check if the current process is running with admin privileges
#[must_use]
pub fn is_admin() -> bool {
    #[cfg(windows)]
    {
        use windows::Win32::Foundation::{CloseHandle, HANDLE};
        use windows::Win32::Security::{
            GetTokenInformation, TokenElevation, TOKEN_ELEVATION, TOKEN_QUERY,
        };
        use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

        unsafe {
            let mut token = HANDLE::default();

            if OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &raw mut token).is_err() {
                return false;
            }

            let mut elevation = TOKEN_ELEVATION::default();
            let mut return_length = 0u32;

            #[allow(clippy::cast_possible_truncation)]
            let result = GetTokenInformation(
                token,
                TokenElevation,
                Some((&raw mut elevation).cast()),
                std::mem::size_of::<TOKEN_ELEVATION>() as u32,
                &raw mut return_length,
            );

            let _ = CloseHandle(token);

            result.is_ok() && elevation.TokenIsElevated != 0
        }
    }

    #[cfg(not(windows))]
    {
        false
    }
}

/// Restart the current application with administrator privileges
///
/// Spawns an elevated copy through PowerShell's `Start-Process -Verb RunAs`,
/// then exits the current process.
///
/// # Errors
///
/// Returns error if the executable path is unknown or PowerShell fails to
/// spawn. Always errors on non-Windows platforms.
pub fn restart_as_admin() -> Result<()> {
    #[cfg(windows)]
    {
        let exe_path = std::env::current_exe().map_err(|e| {
            ToggleError::ElevationFailed(format!("Failed to get executable path: {}", e))
        })?;

        std::process::Command::new("powershell")
            .args([
                "-Command",
                &format!(
                    "Start-Process -FilePath '{}' -Verb RunAs",
                    exe_path.display()
                ),
            ])
            .spawn()
            .map_err(|e| ToggleError::ElevationFailed(e.to_string()))?;

        std::process::exit(0);
    }

    #[cfg(not(windows))]
    {
        Err(ToggleError::Unsupported)
    }
}

/// Store the window and verbs talk to on this platform.
#[cfg(windows)]
pub type SystemStore = crate::store::RegistryStore;
#[cfg(not(windows))]
pub type SystemStore = crate::store::MemoryStore;

/// Toggle bound to the live registry.
///
/// # Errors
///
/// Returns [`ToggleError::Unsupported`] when not running on Windows
pub fn system_toggle() -> Result<ConfigToggle<SystemStore>> {
    #[cfg(windows)]
    {
        Ok(ConfigToggle::new(crate::store::RegistryStore::new()))
    }

    #[cfg(not(windows))]
    {
        Err(ToggleError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_system_toggle_unsupported_off_windows() {
        assert!(!is_admin());
        assert!(matches!(system_toggle(), Err(ToggleError::Unsupported)));
    }
}
