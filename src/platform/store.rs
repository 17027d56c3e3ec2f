//! JSON profile persistence.
//!
//! Stores the profile as `{"profile": {...}}` in a single file beside the
//! executable.

use super::profile::Profile;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// File name of the persisted profile.
pub const PROFILE_FILE: &str = "profile.json";

/// Profile store error types.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    ReadFailed { path: PathBuf, source: io::Error },

    #[error("Failed to write profile {path}: {source}")]
    WriteFailed { path: PathBuf, source: io::Error },

    #[error("Malformed profile {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to encode profile: {0}")]
    EncodeFailed(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ProfileFileRef<'a> {
    profile: &'a Profile,
}

#[derive(Deserialize)]
struct ProfileFile {
    profile: Profile,
}

/// File-based profile store.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Create a store reading and writing the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the fixed location beside the executable.
    pub fn beside_executable() -> Self {
        Self::new(super::executable_dir().join(PROFILE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The canonical default profile.
    pub fn default_profile() -> Profile {
        Profile::default()
    }

    /// Load the profile. Missing or malformed files yield `None`.
    pub fn load(&self) -> Option<Profile> {
        match self.try_load() {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable profile");
                None
            }
        }
    }

    /// Load the profile, reporting why it could not be read.
    ///
    /// `Ok(None)` means the file does not exist.
    pub fn try_load(&self) -> Result<Option<Profile>, ProfileError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no profile file");
                return Ok(None);
            }
            Err(source) => {
                return Err(ProfileError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let file: ProfileFile =
            serde_json::from_str(&text).map_err(|source| ProfileError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(file.profile))
    }

    /// Overwrite the profile file.
    ///
    /// Writes a sibling temp file first and renames it into place.
    pub fn save(&self, profile: &Profile) -> Result<(), ProfileError> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        ProfileFileRef { profile }.serialize(&mut ser)?;

        let tmp = self.path.with_extension("json.tmp");
        let write_err = |source| ProfileError::WriteFailed {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, &buf).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }

    /// Load the profile, creating and persisting the default on first run.
    ///
    /// A failure to write the default is logged, not returned.
    pub fn load_or_init(&self) -> Profile {
        if let Some(profile) = self.load() {
            info!(name = %profile.name, "profile loaded");
            return profile;
        }

        let profile = Self::default_profile();
        match self.save(&profile) {
            Ok(()) => info!(path = %self.path.display(), "default profile created"),
            Err(e) => warn!(error = %e, "could not persist default profile"),
        }
        profile
    }
}
