//! Key-value storage adapters.
//!
//! [`InMemoryKeyValueStore`] backs tests and throwaway sessions.
//! [`FileKeyValueStore`] keeps one file per key inside a capability-scoped
//! directory so a session survives between CLI invocations.

mod atomic_io;

use std::collections::HashMap;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Mutex-guarded map; values vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        self.entries().remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per entry under a root directory.
///
/// Keys are restricted to ASCII letters, digits, `_` and `-` so they can
/// never name a path outside the root.
pub struct FileKeyValueStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FileKeyValueStore {
    /// Open `root`, creating it if needed.
    pub fn open(root: impl AsRef<Utf8Path>) -> io::Result<Self> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory the entries live in.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_for(key: &str) -> Result<Utf8PathBuf, KeyValueStoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(KeyValueStoreError::invalid_key(key));
        }
        Ok(Utf8PathBuf::from(format!("{key}.json")))
    }
}

impl std::fmt::Debug for FileKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileKeyValueStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let file = Self::file_for(key)?;
        match self.dir.read_to_string(file.as_std_path()) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueStoreError::read(key, err.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let file = Self::file_for(key)?;
        atomic_io::replace_file(&self.dir, key, &file, value)
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let file = Self::file_for(key)?;
        match self.dir.remove_file(file.as_std_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueStoreError::write(key, err.to_string())),
        }
    }
}
