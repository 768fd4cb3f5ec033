//! Crash-safe replacement of a single value file.
//!
//! A value is first written in full to a hidden sibling file, flushed, and
//! then renamed over the target. Readers see either the old value or the
//! new one, never a torn write.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Component, Utf8Path};
use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::KeyValueStoreError;

static STAGING_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `path` inside `dir` with `contents`.
///
/// `key` names the logical entry in any error raised.
pub(super) fn replace_file(
    dir: &Dir,
    key: &str,
    path: &Utf8Path,
    contents: &str,
) -> Result<(), KeyValueStoreError> {
    let mut components = path.components();
    let (Some(Utf8Component::Normal(file_name)), None) = (components.next(), components.next())
    else {
        return Err(KeyValueStoreError::invalid_key(key));
    };

    let staging = staging_name(file_name);
    stage(dir, &staging, contents).map_err(|err| {
        discard(dir, &staging);
        KeyValueStoreError::write(key, err.to_string())
    })?;
    promote(dir, &staging, file_name).map_err(|err| {
        discard(dir, &staging);
        KeyValueStoreError::write(key, err.to_string())
    })?;
    sync_directory(dir);
    Ok(())
}

fn staging_name(file_name: &str) -> String {
    let sequence = STAGING_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(".{file_name}.staging.{}.{sequence}", std::process::id())
}

fn stage(dir: &Dir, staging: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(staging, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn promote(dir: &Dir, staging: &str, target: &str) -> io::Result<()> {
    // Rename refuses to overwrite on Windows.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(staging, dir, target)
}

#[cfg(not(windows))]
fn promote(dir: &Dir, staging: &str, target: &str) -> io::Result<()> {
    dir.rename(staging, dir, target)
}

fn discard(dir: &Dir, staging: &str) {
    if let Err(err) = dir.remove_file(staging) {
        tracing::debug!(error = %err, staging, "staging file not removed");
    }
}

fn sync_directory(dir: &Dir) {
    if let Err(err) = dir.open(".").and_then(|handle| handle.sync_all()) {
        tracing::debug!(error = %err, "directory sync skipped");
    }
}
