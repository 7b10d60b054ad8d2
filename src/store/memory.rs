//! In-memory store with the same open/enumerate/read/write/delete surface
//! as the registry, plus switches for making individual calls fail.

use super::{Access, ConfigStore, StoreKey, ValueData};
use std::collections::BTreeMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct MemoryEntry {
    pub values: BTreeMap<String, ValueData>,
    pub deny_read: bool,
    pub deny_write: bool,
    pub fail_set: bool,
    pub fail_enumerate: bool,
}

impl MemoryEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dword(self, name: &str, value: u32) -> Self {
        self.with_value(name, ValueData::Dword(value))
    }

    #[must_use]
    pub fn with_value(mut self, name: &str, value: ValueData) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    #[must_use]
    pub fn deny_read(mut self) -> Self {
        self.deny_read = true;
        self
    }

    #[must_use]
    pub fn deny_write(mut self) -> Self {
        self.deny_write = true;
        self
    }

    #[must_use]
    pub fn fail_set(mut self) -> Self {
        self.fail_set = true;
        self
    }

    #[must_use]
    pub fn fail_enumerate(mut self) -> Self {
        self.fail_enumerate = true;
        self
    }
}

#[derive(Debug)]
struct Tree {
    root_present: bool,
    fail_count: bool,
    // Vec keeps enumeration order stable for a given setup
    entries: Vec<(String, MemoryEntry)>,
}

impl Default for Tree {
    fn default() -> Self {
        Self {
            root_present: true,
            fail_count: false,
            entries: Vec::new(),
        }
    }
}

impl Tree {
    fn entry(&self, name: &str) -> Option<&MemoryEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut MemoryEntry> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }
}

/// Cloning shares the same tree, so a test can keep a handle for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tree: Arc<Mutex<Tree>>,
    open_handles: Arc<AtomicUsize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose interface root does not exist.
    #[must_use]
    pub fn missing_root() -> Self {
        let store = Self::new();
        store.lock().root_present = false;
        store
    }

    #[must_use]
    pub fn with_entry(self, name: &str, entry: MemoryEntry) -> Self {
        self.lock().entries.push((name.to_string(), entry));
        self
    }

    /// Make the root report an error instead of its subkey count.
    #[must_use]
    pub fn failing_count(self) -> Self {
        self.lock().fail_count = true;
        self
    }

    pub fn update_entry(&self, name: &str, f: impl FnOnce(&mut MemoryEntry)) -> bool {
        match self.lock().entry_mut(name) {
            Some(entry) => {
                f(entry);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn value(&self, entry: &str, name: &str) -> Option<ValueData> {
        self.lock().entry(entry)?.values.get(name).copied()
    }

    #[must_use]
    pub fn entry_names(&self) -> Vec<String> {
        self.lock().entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Keys opened through this store and not yet dropped.
    #[must_use]
    pub fn open_handles(&self) -> usize {
        self.open_handles.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Tree> {
        self.tree.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle(&self, entry: Option<String>, access: Access) -> MemoryKey {
        self.open_handles.fetch_add(1, Ordering::SeqCst);
        MemoryKey {
            store: self.clone(),
            entry,
            access,
        }
    }
}

impl ConfigStore for MemoryStore {
    type Key = MemoryKey;

    fn open_root(&self, access: Access) -> io::Result<MemoryKey> {
        if !self.lock().root_present {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "interface root not found",
            ));
        }
        Ok(self.handle(None, access))
    }
}

#[derive(Debug)]
pub struct MemoryKey {
    store: MemoryStore,
    /// `None` for the root
    entry: Option<String>,
    access: Access,
}

impl MemoryKey {
    fn entry_name(&self) -> io::Result<&str> {
        self.entry
            .as_deref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "root key holds no values"))
    }

    fn require(&self, access: Access) -> io::Result<()> {
        if self.access == access {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("key not opened for {access:?}"),
            ))
        }
    }

    fn with_entry<T>(&self, f: impl FnOnce(&mut MemoryEntry) -> io::Result<T>) -> io::Result<T> {
        let name = self.entry_name()?;
        let mut tree = self.store.lock();
        let entry = tree
            .entry_mut(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{name} was removed")))?;
        f(entry)
    }
}

impl Drop for MemoryKey {
    fn drop(&mut self) {
        self.store.open_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

impl StoreKey for MemoryKey {
    fn subkey_count(&self) -> io::Result<usize> {
        if self.entry.is_some() {
            return Ok(0);
        }
        let tree = self.store.lock();
        if tree.fail_count {
            return Err(io::Error::new(io::ErrorKind::Other, "query info failed"));
        }
        Ok(tree.entries.len())
    }

    fn subkey_name(&self, index: usize) -> io::Result<String> {
        if self.entry.is_some() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no subkeys"));
        }
        let tree = self.store.lock();
        match tree.entries.get(index) {
            Some((_, entry)) if entry.fail_enumerate => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("enumeration failed at index {index}"),
            )),
            Some((name, _)) => Ok(name.clone()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no subkey at index {index}"),
            )),
        }
    }

    fn open_subkey(&self, name: &str, access: Access) -> io::Result<Self> {
        if self.entry.is_some() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no subkeys"));
        }
        {
            let tree = self.store.lock();
            let entry = tree
                .entry(name)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))?;
            let denied = match access {
                Access::Read => entry.deny_read,
                Access::Write => entry.deny_write,
            };
            if denied {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "Access is denied",
                ));
            }
        }
        Ok(self.store.handle(Some(name.to_string()), access))
    }

    fn read_value(&self, name: &str) -> io::Result<ValueData> {
        self.require(Access::Read)?;
        self.with_entry(|entry| {
            entry
                .values
                .get(name)
                .copied()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
        })
    }

    fn set_dword(&self, name: &str, value: u32) -> io::Result<()> {
        self.require(Access::Write)?;
        self.with_entry(|entry| {
            if entry.fail_set {
                return Err(io::Error::new(io::ErrorKind::Other, "set value failed"));
            }
            entry.values.insert(name.to_string(), ValueData::Dword(value));
            Ok(())
        })
    }

    fn delete_value(&self, name: &str) -> io::Result<()> {
        self.require(Access::Write)?;
        self.with_entry(|entry| {
            entry
                .values
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
        })
    }
}
