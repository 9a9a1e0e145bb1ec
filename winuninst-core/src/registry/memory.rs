use std::io;

use super::RegistryKey;

/// In-memory registry tree.
///
/// Children and values keep the order they were added in, which stands in for the host
/// registry's enumeration order. Name lookups ignore ASCII case like the real registry.
#[derive(Debug, Clone, Default)]
pub struct MemoryKey {
    subkeys: Vec<(String, MemoryKey)>,
    values: Vec<(String, String)>,
    denied: bool,
    unlisted: bool,
}

impl MemoryKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: impl Into<String>, data: impl Into<String>) -> Self {
        self.values.push((name.into(), data.into()));
        self
    }

    /// Adds a child key. `path` may contain `\` separators; missing intermediate keys
    /// are created.
    pub fn with_subkey(mut self, path: &str, key: MemoryKey) -> Self {
        self.insert(path, key);
        self
    }

    /// Marks this key so that opening it fails with `PermissionDenied`.
    pub fn denied(mut self) -> Self {
        self.denied = true;
        self
    }

    /// Marks this key so that it opens but listing its children fails.
    pub fn unlisted(mut self) -> Self {
        self.unlisted = true;
        self
    }

    pub fn insert(&mut self, path: &str, key: MemoryKey) {
        match path.split_once('\\') {
            None => match self.child_mut(path) {
                Some(existing) => *existing = key,
                None => self.subkeys.push((path.to_string(), key)),
            },
            Some((head, rest)) => {
                if self.child_mut(head).is_none() {
                    self.subkeys.push((head.to_string(), MemoryKey::new()));
                }
                if let Some(child) = self.child_mut(head) {
                    child.insert(rest, key);
                }
            }
        }
    }

    fn child(&self, name: &str) -> Option<&MemoryKey> {
        self.subkeys
            .iter()
            .find(|(child, _)| child.eq_ignore_ascii_case(name))
            .map(|(_, key)| key)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut MemoryKey> {
        self.subkeys
            .iter_mut()
            .find(|(child, _)| child.eq_ignore_ascii_case(name))
            .map(|(_, key)| key)
    }
}

impl RegistryKey for MemoryKey {
    fn open_subkey(&self, path: &str) -> io::Result<Self> {
        let mut current = self;
        for segment in path.split('\\').filter(|s| !s.is_empty()) {
            current = current.child(segment).ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("key {} not found", path))
            })?;
            if current.denied {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("access to {} denied", path),
                ));
            }
        }
        Ok(current.clone())
    }

    fn subkey_names(&self) -> io::Result<Vec<String>> {
        if self.unlisted {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "enumerating subkeys denied",
            ));
        }
        Ok(self.subkeys.iter().map(|(name, _)| name.clone()).collect())
    }

    fn string_value(&self, name: &str) -> io::Result<String> {
        self.values
            .iter()
            .find(|(value, _)| value.eq_ignore_ascii_case(name))
            .map(|(_, data)| data.clone())
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("value {} not found", name))
            })
    }
}
