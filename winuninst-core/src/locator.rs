use tracing::debug;

use crate::registry::RegistryKey;
use crate::{Error, Program, RegistryLocation, Result};

pub const UNINSTALL_KEY_PATH: &str = "SOFTWARE\\Microsoft\\Windows\\CurrentVersion\\Uninstall";
pub const UNINSTALL_KEY_PATH_WOW6432NODE: &str =
    "SOFTWARE\\Wow6432Node\\Microsoft\\Windows\\CurrentVersion\\Uninstall";

/// Uninstall views searched, in result order.
pub const UNINSTALL_VIEWS: [(&str, RegistryLocation); 2] = [
    (UNINSTALL_KEY_PATH, RegistryLocation::Standard),
    (UNINSTALL_KEY_PATH_WOW6432NODE, RegistryLocation::Wow6432Node),
];

/// Returns every program under both uninstall views of `hklm` whose display name
/// contains `query`, ignoring case.
///
/// Native entries come first, then WOW64 entries, each in enumeration order. Entries
/// that cannot be opened or lack `DisplayName`/`UninstallString` are left out. Failing
/// to open or enumerate either view is an error.
pub fn find_programs<K: RegistryKey>(hklm: &K, query: &str) -> Result<Vec<Program>> {
    let needle = query.to_lowercase();
    let mut programs = Vec::new();

    for (path, location) in UNINSTALL_VIEWS {
        let found = find_programs_in_key(hklm, path, &needle, location)?;
        debug!(view = %location, matches = found.len(), "searched uninstall view");
        programs.extend(found);
    }

    Ok(programs)
}

fn find_programs_in_key<K: RegistryKey>(
    hklm: &K,
    path: &str,
    needle: &str,
    location: RegistryLocation,
) -> Result<Vec<Program>> {
    let root_error = |source| Error::RegistryRoot {
        path: path.to_string(),
        source,
    };
    let view = hklm.open_subkey(path).map_err(root_error)?;
    let names = view.subkey_names().map_err(root_error)?;

    let mut programs = Vec::new();
    for name in names {
        let entry = match view.open_subkey(&name) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key = %name, error = %e, "skipping unreadable uninstall entry");
                continue;
            }
        };

        let Ok(display_name) = entry.string_value("DisplayName") else {
            debug!(key = %name, "entry has no DisplayName");
            continue;
        };
        if !display_name.to_lowercase().contains(needle) {
            continue;
        }

        let Ok(uninstall_string) = entry.string_value("UninstallString") else {
            debug!(key = %name, "matching entry has no UninstallString");
            continue;
        };

        programs.push(Program {
            display_name,
            uninstall_string,
            registry_location: location,
        });
    }

    Ok(programs)
}
