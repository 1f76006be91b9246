use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::geo::CoordinateError;
use crate::core::profile::{LocationProfile, ProfileRecord};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("profile record is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("profile record has an unusable coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),
    #[error("profile capture aborted before all fields were entered")]
    CaptureAborted,
    #[error("terminal io error: {0}")]
    Terminal(#[source] std::io::Error),
    #[error("no profile record readable right after capture")]
    MissingAfterCapture,
}

/// Result of looking for a stored profile. A missing record is not an error.
#[derive(Debug)]
pub enum ProfileLookup {
    Found(LocationProfile),
    NotFound,
}

/// The single profile record, kept as pretty JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    path: PathBuf,
}

impl JsonProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ProfileLookup, ProfileError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No profile record");
                return Ok(ProfileLookup::NotFound);
            }
            Err(source) => {
                return Err(ProfileError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let record: ProfileRecord = serde_json::from_str(&content)?;
        let profile = LocationProfile::from_record(&record)?;
        debug!(path = %self.path.display(), "Loaded profile record");
        Ok(ProfileLookup::Found(profile))
    }

    /// Replaces whatever record exists; fields are never merged.
    pub fn save(&self, record: &ProfileRecord) -> Result<(), ProfileError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| ProfileError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, body).map_err(|source| ProfileError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "Saved profile record");
        Ok(())
    }
}
