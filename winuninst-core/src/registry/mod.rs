use std::io;

pub mod memory;
#[cfg(windows)]
pub mod windows;

pub use memory::MemoryKey;

/// Read-only view of a hierarchical registry key.
///
/// Dropping a key releases whatever handle backs it, so a key opened inside a loop is
/// closed on every path out of the iteration.
pub trait RegistryKey: Sized {
    /// Opens a descendant key. `path` may span several levels separated by `\`.
    fn open_subkey(&self, path: &str) -> io::Result<Self>;

    /// Names of the immediate child keys, in enumeration order.
    fn subkey_names(&self) -> io::Result<Vec<String>>;

    /// Reads a string value stored directly on this key.
    fn string_value(&self, name: &str) -> io::Result<String>;
}
