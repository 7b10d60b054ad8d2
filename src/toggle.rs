//! Query, enable and disable `TcpAckFrequency` across all interface keys.
//!
//! Every operation reopens the root and walks it from index 0, so the result
//! always reflects the store as it is now. Handles are scoped to the call.

use crate::error::{Result, ToggleError};
use crate::reporter::{Issue, Reporter};
use crate::status::{AggregateStatus, PassSummary};
use crate::store::{Access, ConfigStore, StoreKey, ValueData};
use tracing::{debug, error, info, instrument, trace, warn};

/// Value name Windows reads per interface for delayed ACK behavior.
pub const TCP_ACK_FREQUENCY: &str = "TcpAckFrequency";

/// The single managed value and the data that means "on".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    pub name: &'static str,
    pub enabled_value: u32,
}

impl Setting {
    /// Acknowledge every segment immediately.
    pub const TCP_ACK_FREQUENCY: Self = Self {
        name: TCP_ACK_FREQUENCY,
        enabled_value: 1,
    };
}

impl Default for Setting {
    fn default() -> Self {
        Self::TCP_ACK_FREQUENCY
    }
}

#[derive(Debug, Clone, Copy)]
enum Change {
    Set,
    Delete,
}

pub struct ConfigToggle<S> {
    store: S,
    setting: Setting,
}

impl<S: ConfigStore> ConfigToggle<S> {
    pub fn new(store: S) -> Self {
        Self::with_setting(store, Setting::default())
    }

    pub fn with_setting(store: S, setting: Setting) -> Self {
        Self { store, setting }
    }

    /// Count interface keys with the setting on and classify the result.
    ///
    /// Keys that cannot be opened are reported and still count toward the
    /// total, so they keep the status away from `Enabled`.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the root cannot be opened or counted
    #[instrument(skip_all, fields(setting = self.setting.name))]
    pub fn query_status(&self, reporter: &dyn Reporter) -> Result<AggregateStatus> {
        let (root, total) = self.open_root(reporter)?;
        let mut set_count = 0;

        for index in 0..total {
            let Some(name) = entry_name(&root, index, reporter) else {
                continue;
            };

            let key = match root.open_subkey(&name, Access::Read) {
                Ok(key) => key,
                Err(e) => {
                    report_warning(
                        reporter,
                        format!("Could not open interface key {name} for reading, skipping it: {e}"),
                    );
                    continue;
                }
            };

            if self.is_set(&key) {
                set_count += 1;
            }
            trace!(entry = %name, set_count, "Inspected interface key");
        }

        let status = AggregateStatus::from_tally(set_count, total);
        info!(set_count, total, status = %status, "Queried {}", self.setting.name);
        Ok(status)
    }

    /// Write the enabled value to every interface key.
    ///
    /// # Errors
    ///
    /// Returns a fatal error if the root is unavailable, or
    /// [`ToggleError::WriteAccessDenied`] when a key cannot be opened for
    /// writing. Keys after that one are left untouched.
    #[instrument(skip_all, fields(setting = self.setting.name))]
    pub fn enable(&self, reporter: &dyn Reporter) -> Result<PassSummary> {
        self.apply(Change::Set, reporter)
    }

    /// Delete the value from every interface key.
    ///
    /// Keys that never had the value produce a warning each; the pass goes on.
    ///
    /// # Errors
    ///
    /// Same as [`ConfigToggle::enable`]
    #[instrument(skip_all, fields(setting = self.setting.name))]
    pub fn disable(&self, reporter: &dyn Reporter) -> Result<PassSummary> {
        self.apply(Change::Delete, reporter)
    }

    fn open_root(&self, reporter: &dyn Reporter) -> Result<(S::Key, usize)> {
        let root = self
            .store
            .open_root(Access::Read)
            .map_err(|e| report_fatal(reporter, ToggleError::RootUnavailable(e.to_string())))?;

        let total = root
            .subkey_count()
            .map_err(|e| report_fatal(reporter, ToggleError::CountUnavailable(e.to_string())))?;

        debug!(total, "Opened interface root");
        Ok((root, total))
    }

    fn is_set(&self, key: &S::Key) -> bool {
        matches!(
            key.read_value(self.setting.name),
            Ok(ValueData::Dword(v)) if v == self.setting.enabled_value
        )
    }

    fn apply(&self, change: Change, reporter: &dyn Reporter) -> Result<PassSummary> {
        let (root, total) = self.open_root(reporter)?;
        let mut summary = PassSummary {
            total,
            ..PassSummary::default()
        };

        for index in 0..total {
            let Some(name) = entry_name(&root, index, reporter) else {
                summary.warnings += 1;
                continue;
            };

            // A key we can't open for writing means we lack the rights for
            // all of them, so stop here.
            let key = root.open_subkey(&name, Access::Write).map_err(|e| {
                let err = ToggleError::WriteAccessDenied {
                    entry: name.clone(),
                    reason: e.to_string(),
                };
                error!(error = %err, changed = summary.changed, "Aborting pass");
                reporter.report(&Issue::aborted(err.user_message()));
                err
            })?;

            let outcome = match change {
                Change::Set => key.set_dword(self.setting.name, self.setting.enabled_value),
                Change::Delete => key.delete_value(self.setting.name),
            };

            match outcome {
                Ok(()) => {
                    summary.changed += 1;
                    trace!(entry = %name, ?change, "Updated interface key");
                }
                Err(e) => {
                    let verb = match change {
                        Change::Set => "set",
                        Change::Delete => "delete",
                    };
                    report_warning(
                        reporter,
                        format!(
                            "Could not {verb} {} on interface key {name}, continuing: {e}",
                            self.setting.name
                        ),
                    );
                    summary.warnings += 1;
                }
            }
        }

        info!(
            total = summary.total,
            changed = summary.changed,
            warnings = summary.warnings,
            ?change,
            "Finished pass over interface keys"
        );
        Ok(summary)
    }
}

fn entry_name<K: StoreKey>(root: &K, index: usize, reporter: &dyn Reporter) -> Option<String> {
    root.subkey_name(index)
        .map_err(|e| {
            report_warning(
                reporter,
                format!("Could not enumerate interface key #{index}, continuing: {e}"),
            );
        })
        .ok()
}

fn report_warning(reporter: &dyn Reporter, message: String) {
    warn!("{message}");
    reporter.report(&Issue::warning(message));
}

fn report_fatal(reporter: &dyn Reporter, err: ToggleError) -> ToggleError {
    error!(error = %err, "Interface root unusable");
    reporter.report(&Issue::fatal(err.user_message()));
    err
}
