// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential persistence: key-value stores with a JSON file backend.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::credential::CredentialPair;

/// Storage collaborator for the credential pair.
///
/// Two fixed keys (the access token and the refresh token); any durable or
/// in-memory key-value backend satisfies the contract. The gateway mirrors
/// its live pair into the store on every change and treats store failures
/// as non-fatal.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Option<CredentialPair>>;
    fn save(&self, pair: &CredentialPair) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Process-memory store. The default; lifecycle ends with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<CredentialPair>>,
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> anyhow::Result<Option<CredentialPair>> {
        Ok(self.inner.lock().map_err(|_| anyhow::anyhow!("store poisoned"))?.clone())
    }

    fn save(&self, pair: &CredentialPair) -> anyhow::Result<()> {
        *self.inner.lock().map_err(|_| anyhow::anyhow!("store poisoned"))? = Some(pair.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.inner.lock().map_err(|_| anyhow::anyhow!("store poisoned"))? = None;
        Ok(())
    }
}

/// JSON-file store with atomic writes (write tmp + rename).
///
/// Uses a unique temp filename (PID + counter) to avoid corruption when
/// concurrent saves race on the same `.tmp` file — a shorter write can leave
/// trailing bytes from a longer previous write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> anyhow::Result<Option<CredentialPair>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let pair: CredentialPair = serde_json::from_str(&contents)?;
        Ok(Some(pair))
    }

    fn save(&self, pair: &CredentialPair) -> anyhow::Result<()> {
        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let json = serde_json::to_string_pretty(pair)?;
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(
            "{}.{}.{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            std::process::id(),
            seq,
        );
        let tmp_path = self.path.with_file_name(tmp_name);
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
