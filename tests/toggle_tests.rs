//! Query, enable and disable passes against the in-memory store

use reduce_ping::store::memory::{MemoryEntry, MemoryStore};
use reduce_ping::store::ValueData;
use reduce_ping::{
    AggregateStatus, CollectingReporter, ConfigToggle, Severity, SilentReporter, ToggleError,
    TCP_ACK_FREQUENCY,
};

fn store_with(values: &[Option<u32>]) -> MemoryStore {
    values
        .iter()
        .enumerate()
        .fold(MemoryStore::new(), |store, (i, value)| {
            let entry = match value {
                Some(v) => MemoryEntry::new().with_dword(TCP_ACK_FREQUENCY, *v),
                None => MemoryEntry::new(),
            };
            store.with_entry(&format!("{{interface-{i}}}"), entry)
        })
}

fn query(store: &MemoryStore) -> AggregateStatus {
    ConfigToggle::new(store.clone())
        .query_status(&SilentReporter)
        .expect("query failed")
}

#[test]
fn test_missing_root_is_fatal() {
    let toggle = ConfigToggle::new(MemoryStore::missing_root());

    let err = toggle.query_status(&SilentReporter).unwrap_err();
    assert!(matches!(err, ToggleError::RootUnavailable(_)));
    assert!(err.is_fatal());

    assert!(toggle.enable(&SilentReporter).unwrap_err().is_fatal());
    assert!(toggle.disable(&SilentReporter).unwrap_err().is_fatal());
}

#[test]
fn test_count_failure_is_fatal() {
    let store = store_with(&[Some(1)]).failing_count();
    let reporter = CollectingReporter::new();

    let err = ConfigToggle::new(store.clone())
        .query_status(&reporter)
        .unwrap_err();

    assert!(matches!(err, ToggleError::CountUnavailable(_)));
    assert_eq!(reporter.count(Severity::Fatal), 1);
    assert_eq!(store.open_handles(), 0);
}

#[test]
fn test_no_entries_is_enabled() {
    // Nothing to tally: set == total == 0 lands on Enabled
    let store = MemoryStore::new();
    assert_eq!(query(&store), AggregateStatus::Enabled);

    let summary = ConfigToggle::new(store)
        .disable(&SilentReporter)
        .unwrap();
    assert_eq!(summary.total, 0);
}

#[test]
fn test_all_set_is_enabled() {
    for n in 1..=5 {
        let store = store_with(&vec![Some(1); n]);
        assert_eq!(query(&store), AggregateStatus::Enabled, "n = {n}");
    }
}

#[test]
fn test_none_set_is_disabled() {
    for n in 1..=5 {
        let store = store_with(&vec![None; n]);
        assert_eq!(query(&store), AggregateStatus::Disabled, "n = {n}");
    }
}

#[test]
fn test_some_set_is_partial() {
    for n in 2..=5 {
        for set in 1..n {
            let values: Vec<_> = (0..n).map(|i| (i < set).then_some(1)).collect();
            let store = store_with(&values);
            assert_eq!(
                query(&store),
                AggregateStatus::PartiallyEnabled,
                "{set} of {n}"
            );
        }
    }
}

#[test]
fn test_other_values_are_not_set() {
    assert_eq!(query(&store_with(&[Some(0)])), AggregateStatus::Disabled);
    assert_eq!(query(&store_with(&[Some(2)])), AggregateStatus::Disabled);

    let store = MemoryStore::new().with_entry(
        "{a}",
        MemoryEntry::new().with_value(TCP_ACK_FREQUENCY, ValueData::Other),
    );
    assert_eq!(query(&store), AggregateStatus::Disabled);
}

#[test]
fn test_mixed_values_scenario() {
    let store = store_with(&[Some(1), Some(2), None]);
    assert_eq!(query(&store), AggregateStatus::PartiallyEnabled);
}

#[test]
fn test_enable_then_query_is_enabled() {
    for values in [
        vec![None, None],
        vec![Some(1), None, Some(7)],
        vec![Some(0)],
        vec![Some(1), Some(1)],
    ] {
        let store = store_with(&values);
        ConfigToggle::new(store.clone())
            .enable(&SilentReporter)
            .unwrap();
        assert_eq!(query(&store), AggregateStatus::Enabled, "{values:?}");
    }
}

#[test]
fn test_disable_then_query_is_disabled() {
    for values in [
        vec![Some(1), Some(1)],
        vec![Some(1), None, Some(7)],
        vec![None],
    ] {
        let store = store_with(&values);
        ConfigToggle::new(store.clone())
            .disable(&SilentReporter)
            .unwrap();
        assert_eq!(query(&store), AggregateStatus::Disabled, "{values:?}");
    }
}

#[test]
fn test_enable_is_idempotent() {
    let once = store_with(&[None, Some(3), Some(1)]);
    let twice = store_with(&[None, Some(3), Some(1)]);

    ConfigToggle::new(once.clone())
        .enable(&SilentReporter)
        .unwrap();
    let toggle = ConfigToggle::new(twice.clone());
    toggle.enable(&SilentReporter).unwrap();
    let second = toggle.enable(&SilentReporter).unwrap();

    assert!(second.is_clean());
    for name in once.entry_names() {
        assert_eq!(
            once.value(&name, TCP_ACK_FREQUENCY),
            twice.value(&name, TCP_ACK_FREQUENCY)
        );
        assert_eq!(
            twice.value(&name, TCP_ACK_FREQUENCY),
            Some(ValueData::Dword(1))
        );
    }
}

#[test]
fn test_denied_write_changes_nothing() {
    let store = MemoryStore::new().with_entry("{a}", MemoryEntry::new().deny_write());
    let reporter = CollectingReporter::new();

    let err = ConfigToggle::new(store.clone())
        .enable(&reporter)
        .unwrap_err();

    assert!(matches!(err, ToggleError::WriteAccessDenied { ref entry, .. } if entry == "{a}"));
    assert!(!err.is_fatal());
    assert_eq!(reporter.count(Severity::Aborted), 1);
    assert_eq!(query(&store), AggregateStatus::Disabled);
}

#[test]
fn test_denied_write_stops_remaining_entries() {
    let store = MemoryStore::new()
        .with_entry("{a}", MemoryEntry::new())
        .with_entry("{b}", MemoryEntry::new().deny_write())
        .with_entry("{c}", MemoryEntry::new());

    let result = ConfigToggle::new(store.clone()).enable(&SilentReporter);

    assert!(result.is_err());
    assert_eq!(
        store.value("{a}", TCP_ACK_FREQUENCY),
        Some(ValueData::Dword(1))
    );
    assert_eq!(store.value("{b}", TCP_ACK_FREQUENCY), None);
    assert_eq!(store.value("{c}", TCP_ACK_FREQUENCY), None);
    assert_eq!(query(&store), AggregateStatus::PartiallyEnabled);
    assert_eq!(store.open_handles(), 0);
}

#[test]
fn test_disable_denied_write_keeps_values() {
    let store = MemoryStore::new()
        .with_entry("{a}", MemoryEntry::new().with_dword(TCP_ACK_FREQUENCY, 1).deny_write())
        .with_entry("{b}", MemoryEntry::new().with_dword(TCP_ACK_FREQUENCY, 1));

    assert!(ConfigToggle::new(store.clone())
        .disable(&SilentReporter)
        .is_err());
    assert_eq!(query(&store), AggregateStatus::Enabled);
}

#[test]
fn test_disable_missing_values_warns_and_continues() {
    let store = store_with(&[None, Some(1), None]);
    let reporter = CollectingReporter::new();

    let summary = ConfigToggle::new(store.clone())
        .disable(&reporter)
        .unwrap();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.changed, 1);
    assert_eq!(summary.warnings, 2);
    assert_eq!(reporter.count(Severity::Warning), 2);
    assert_eq!(reporter.count(Severity::Aborted), 0);
    assert_eq!(query(&store), AggregateStatus::Disabled);
}

#[test]
fn test_set_failure_warns_and_continues() {
    let store = MemoryStore::new()
        .with_entry("{a}", MemoryEntry::new().fail_set())
        .with_entry("{b}", MemoryEntry::new());
    let reporter = CollectingReporter::new();

    let summary = ConfigToggle::new(store.clone())
        .enable(&reporter)
        .unwrap();

    assert_eq!(summary.changed, 1);
    assert_eq!(summary.warnings, 1);
    assert!(!summary.is_clean());
    assert_eq!(reporter.count(Severity::Warning), 1);
    assert_eq!(query(&store), AggregateStatus::PartiallyEnabled);
}

#[test]
fn test_unreadable_entry_counts_toward_total() {
    let store = MemoryStore::new()
        .with_entry("{a}", MemoryEntry::new().with_dword(TCP_ACK_FREQUENCY, 1))
        .with_entry(
            "{b}",
            MemoryEntry::new()
                .with_dword(TCP_ACK_FREQUENCY, 1)
                .deny_read(),
        );
    let reporter = CollectingReporter::new();

    let status = ConfigToggle::new(store.clone())
        .query_status(&reporter)
        .unwrap();

    assert_eq!(status, AggregateStatus::PartiallyEnabled);
    assert_eq!(reporter.count(Severity::Warning), 1);
}

#[test]
fn test_all_unreadable_is_disabled() {
    let store = MemoryStore::new()
        .with_entry("{a}", MemoryEntry::new().with_dword(TCP_ACK_FREQUENCY, 1).deny_read())
        .with_entry("{b}", MemoryEntry::new().with_dword(TCP_ACK_FREQUENCY, 1).deny_read());

    assert_eq!(query(&store), AggregateStatus::Disabled);
}

#[test]
fn test_status_follows_external_edits() {
    let store = store_with(&[Some(1), Some(1)]);
    let toggle = ConfigToggle::new(store.clone());
    assert_eq!(
        toggle.query_status(&SilentReporter).unwrap(),
        AggregateStatus::Enabled
    );

    store.update_entry("{interface-1}", |entry| {
        entry.values.remove(TCP_ACK_FREQUENCY);
    });

    assert_eq!(
        toggle.query_status(&SilentReporter).unwrap(),
        AggregateStatus::PartiallyEnabled
    );
}

#[test]
fn test_no_handles_left_open() {
    let store = MemoryStore::new()
        .with_entry("{a}", MemoryEntry::new().fail_set())
        .with_entry("{b}", MemoryEntry::new().deny_read().fail_enumerate())
        .with_entry("{c}", MemoryEntry::new().with_dword(TCP_ACK_FREQUENCY, 1))
        .with_entry("{d}", MemoryEntry::new().deny_write());
    let toggle = ConfigToggle::new(store.clone());

    let _ = toggle.query_status(&SilentReporter);
    assert_eq!(store.open_handles(), 0);
    let _ = toggle.enable(&SilentReporter);
    assert_eq!(store.open_handles(), 0);
    let _ = toggle.disable(&SilentReporter);
    assert_eq!(store.open_handles(), 0);
}
