//! Command line verbs. Anything other than an exact `enable` or `disable`
//! opens the window instead.

use crate::error::Result;
use crate::reporter::SilentReporter;
use crate::status::PassSummary;
use crate::store::ConfigStore;
use crate::toggle::ConfigToggle;
use std::ffi::OsString;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Enable,
    Disable,
    Interactive,
}

impl Invocation {
    /// Parse the arguments that follow the program name.
    ///
    /// The whole command line must match, so `enable now` opens the window.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let line = args
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        match line.as_str() {
            "enable" => Self::Enable,
            "disable" => Self::Disable,
            _ => Self::Interactive,
        }
    }

    /// Like [`Invocation::from_args`], for raw process arguments. An
    /// argument that is not valid Unicode can't be a verb.
    pub fn from_os_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Option<Vec<String>> = args.into_iter().map(|a| a.into_string().ok()).collect();
        args.map_or(Self::Interactive, Self::from_args)
    }
}

/// Run a verb without any user interaction and return the process exit code.
///
/// Only errors that stopped the pass before it began give a non-zero code.
pub fn run_verb<S: ConfigStore>(toggle: &ConfigToggle<S>, invocation: Invocation) -> i32 {
    let result: Result<PassSummary> = match invocation {
        Invocation::Enable => toggle.enable(&SilentReporter),
        Invocation::Disable => toggle.disable(&SilentReporter),
        Invocation::Interactive => return 0,
    };

    match result {
        Ok(summary) => {
            info!(?invocation, ?summary, "Done");
            0
        }
        Err(e) if e.is_fatal() => 1,
        Err(e) => {
            warn!(?invocation, error = %e, "Pass stopped early");
            0
        }
    }
}
