//! Registry access - thin wrapper over winreg.

use super::{Access, ConfigStore, StoreKey, ValueData};
use std::io;
use winreg::enums::{RegType, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WRITE, REG_DWORD};
use winreg::{RegKey, HKEY};

/// Where Windows keeps one subkey per TCP/IP interface.
pub const INTERFACES_KEY: &str = r"SYSTEM\CurrentControlSet\services\Tcpip\Parameters\Interfaces";

pub struct RegistryStore {
    hive: HKEY,
    path: String,
}

impl RegistryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            hive: HKEY_LOCAL_MACHINE,
            path: INTERFACES_KEY.to_string(),
        }
    }
}

impl Default for RegistryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Only a 4-byte `REG_DWORD` is a DWORD; anything else is `Other`.
fn decode_value(vtype: RegType, bytes: &[u8]) -> ValueData {
    match <[u8; 4]>::try_from(bytes) {
        Ok(raw) if matches!(vtype, REG_DWORD) => ValueData::Dword(u32::from_le_bytes(raw)),
        _ => ValueData::Other,
    }
}

const fn flags(access: Access) -> u32 {
    match access {
        Access::Read => KEY_READ,
        Access::Write => KEY_WRITE,
    }
}

impl ConfigStore for RegistryStore {
    type Key = RegistryKey;

    fn open_root(&self, access: Access) -> io::Result<RegistryKey> {
        RegKey::predef(self.hive)
            .open_subkey_with_flags(&self.path, flags(access))
            .map(RegistryKey)
    }
}

/// Open registry key; `RegKey` closes the handle when dropped.
pub struct RegistryKey(RegKey);

impl StoreKey for RegistryKey {
    fn subkey_count(&self) -> io::Result<usize> {
        Ok(self.0.query_info()?.sub_keys)
    }

    fn subkey_name(&self, index: usize) -> io::Result<String> {
        self.0.enum_keys().nth(index).unwrap_or_else(|| {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no subkey at index {index}"),
            ))
        })
    }

    fn open_subkey(&self, name: &str, access: Access) -> io::Result<Self> {
        self.0
            .open_subkey_with_flags(name, flags(access))
            .map(RegistryKey)
    }

    fn read_value(&self, name: &str) -> io::Result<ValueData> {
        let value = self.0.get_raw_value(name)?;
        Ok(decode_value(value.vtype, &value.bytes))
    }

    fn set_dword(&self, name: &str, value: u32) -> io::Result<()> {
        self.0.set_value(name, &value)
    }

    fn delete_value(&self, name: &str) -> io::Result<()> {
        self.0.delete_value(name)
    }
}
