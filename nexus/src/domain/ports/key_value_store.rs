//! Port for the persisted key-value storage sessions survive restarts in.
//!
//! Values are opaque strings; callers own the encoding. Adapters must make a
//! `set` visible to the next `get` on the same store.

use super::define_port_error;

/// Key holding the serialised current identity.
pub const SESSION_RECORD_KEY: &str = "networkNexus_user";

/// Key holding the serialised list of every identity created by signup.
pub const IDENTITY_LEDGER_KEY: &str = "networkNexus_allUsers";

define_port_error! {
    /// Errors raised by key-value store adapters.
    pub enum KeyValueStoreError {
        /// Key name cannot be stored by this adapter.
        InvalidKey {
            /// Rejected key.
            key: String,
        } => "invalid storage key '{key}'",
        /// Reading a key failed.
        Read {
            /// Key being read.
            key: String,
            /// Adapter failure description.
            message: String,
        } => "failed to read '{key}': {message}",
        /// Writing or removing a key failed.
        Write {
            /// Key being written or removed.
            key: String,
            /// Adapter failure description.
            message: String,
        } => "failed to write '{key}': {message}",
    }
}

/// String key-value storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}
