//! File-backed identity provider.
//!
//! Reads the signed-in identity from a JSON file left behind by the
//! sign-in flow. Sign-out removes the file. Absent or unreadable data
//! means "anonymous", which puts the player on the free-action quota.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;

use netrift_domain::Identity;

use crate::ports::outbound::IdentityPort;

const IDENTITY_FILE: &str = "identity.json";

pub struct FileIdentityProvider {
    path: PathBuf,
    cached: Mutex<Option<Option<Identity>>>,
}

impl FileIdentityProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: Mutex::new(None),
        }
    }

    /// Provider rooted in the platform config directory.
    pub fn default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("io", "netrift", "netrift")?;
        Some(Self::new(dirs.config_dir().join(IDENTITY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_identity(&self) -> Option<Identity> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "identity file corrupt, ignoring");
                None
            }
        }
    }
}

impl IdentityPort for FileIdentityProvider {
    fn current_identity(&self) -> Option<Identity> {
        let mut cached = self.cached.lock();
        if let Some(known) = cached.as_ref() {
            return known.clone();
        }
        let identity = self.read_identity();
        *cached = Some(identity.clone());
        identity
    }

    fn clear_identity(&self) {
        *self.cached.lock() = Some(None);
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove identity file");
            }
        }
    }
}
