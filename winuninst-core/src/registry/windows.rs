use std::io;

use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ};
use winreg::RegKey;

use super::RegistryKey;

/// The predefined `HKEY_LOCAL_MACHINE` handle.
pub fn local_machine() -> RegKey {
    RegKey::predef(HKEY_LOCAL_MACHINE)
}

impl RegistryKey for RegKey {
    fn open_subkey(&self, path: &str) -> io::Result<Self> {
        RegKey::open_subkey_with_flags(self, path, KEY_READ)
    }

    fn subkey_names(&self) -> io::Result<Vec<String>> {
        self.enum_keys().collect()
    }

    fn string_value(&self, name: &str) -> io::Result<String> {
        self.get_value::<String, _>(name)
    }
}
