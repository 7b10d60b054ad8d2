//! Key/value store abstraction over the registry.
//!
//! Handles close on drop, so a key never outlives the scope that opened it.

pub mod memory;
#[cfg(windows)]
pub mod registry;

use std::io;

pub use memory::MemoryStore;
#[cfg(windows)]
pub use registry::RegistryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// A value as far as this tool cares: a 32-bit DWORD or something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueData {
    Dword(u32),
    Other,
}

pub trait ConfigStore {
    type Key: StoreKey;

    /// Open the interface root. Dropping the key closes it.
    fn open_root(&self, access: Access) -> io::Result<Self::Key>;
}

pub trait StoreKey: Sized {
    fn subkey_count(&self) -> io::Result<usize>;
    fn subkey_name(&self, index: usize) -> io::Result<String>;
    fn open_subkey(&self, name: &str, access: Access) -> io::Result<Self>;
    fn read_value(&self, name: &str) -> io::Result<ValueData>;
    fn set_dword(&self, name: &str, value: u32) -> io::Result<()>;
    fn delete_value(&self, name: &str) -> io::Result<()>;
}
