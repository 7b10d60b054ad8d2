use serde::Serialize;
use std::fmt;

/// Combined state of the setting across every interface key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AggregateStatus {
    Disabled,
    Enabled,
    PartiallyEnabled,
}

impl AggregateStatus {
    /// Classify a tally. `total` includes entries that could not be read.
    #[must_use]
    pub const fn from_tally(set_count: usize, total: usize) -> Self {
        if set_count == 0 && total != 0 {
            Self::Disabled
        } else if set_count == total {
            Self::Enabled
        } else {
            Self::PartiallyEnabled
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Enabled => "Enabled",
            Self::PartiallyEnabled => "Partially enabled",
        }
    }

    /// Whether the enable action still has something to do.
    #[must_use]
    pub const fn can_enable(&self) -> bool {
        !matches!(self, Self::Enabled)
    }

    #[must_use]
    pub const fn can_disable(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

impl fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shown on the status card.
pub const SETTING_DESCRIPTION: &str = "Windows normally delays TCP acknowledgments to combine them. \
Turning that off lowers latency (mainly for games) at the cost of a little throughput.";

/// `TcpAckFrequency` is read when the TCP/IP stack starts.
pub const RESTART_NOTICE: &str = "Restart Windows for the change to take effect.";

/// Outcome of an enable or disable pass that ran to the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    /// Interface keys reported by the root
    pub total: usize,
    /// Keys whose value was written or deleted
    pub changed: usize,
    /// Entry-local failures that were skipped
    pub warnings: usize,
}

impl PassSummary {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.warnings == 0 && self.changed == self.total
    }

    /// Line shown after the pass, always ending with [`RESTART_NOTICE`].
    #[must_use]
    pub fn message(&self) -> String {
        if self.is_clean() {
            format!("Updated all {} network interfaces. {RESTART_NOTICE}", self.total)
        } else {
            format!(
                "Updated {} of {} network interfaces. {RESTART_NOTICE}",
                self.changed, self.total
            )
        }
    }
}
