pub mod cli;
pub mod error;
pub mod logging;
pub mod reporter;
pub mod status;
pub mod store;
pub mod toggle;
pub mod utils;

// Public, stable-ish API surface for consumers (UI / other crates)

pub use crate::toggle::{ConfigToggle, Setting, TCP_ACK_FREQUENCY};

pub use crate::status::{AggregateStatus, PassSummary};

pub use crate::error::{Result, ToggleError};

pub use crate::reporter::{CollectingReporter, Issue, Reporter, Severity, SilentReporter};

pub use crate::utils::{is_admin, restart_as_admin, system_toggle, SystemStore};

pub mod prelude {
    pub use crate::error::{Result, ToggleError};
    pub use crate::reporter::{CollectingReporter, Issue, Reporter, Severity, SilentReporter};
    pub use crate::status::{AggregateStatus, PassSummary};
    pub use crate::store::{Access, ConfigStore, StoreKey, ValueData};
    pub use crate::toggle::{ConfigToggle, Setting};
    pub use crate::utils::{is_admin, restart_as_admin, system_toggle};
}
