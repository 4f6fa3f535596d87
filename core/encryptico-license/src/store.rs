//! License file persistence.
//!
//! A license file is a pretty-printed JSON document carrying a format
//! version, the issue timestamp and the [`License`] record itself. Loading
//! refuses any version other than [`LicenseFile::CURRENT_VERSION`].

use crate::error::{LicenseError, LicenseResult};
use crate::license::{License, RawLicense};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::{debug, info};

/// File name used when a target path does not name a file.
pub const DEFAULT_LICENSE_FILE_NAME: &str = "license.lic";

/// Application directory under the platform data directory.
const APP_DIR_NAME: &str = "encryptico";

/// The versioned on-disk license record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseFile {
    /// Format version of this record.
    pub version: u32,
    /// When the file was issued.
    pub issued_at: DateTime<Utc>,
    /// The license itself.
    pub license: License,
}

impl LicenseFile {
    /// Current license file format version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Wraps a license in a record stamped with the current time.
    #[must_use]
    pub fn new(license: License) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            issued_at: Utc::now(),
            license,
        }
    }

    /// Parses a record from JSON.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVersion` for records written by another format
    /// version, `InvalidArgument` for a license whose fields violate its
    /// invariants, or a serialization error for anything that is not a
    /// well-formed record.
    pub fn from_json(json: &str) -> LicenseResult<Self> {
        #[derive(Deserialize)]
        struct VersionHeader {
            version: u32,
        }

        #[derive(Deserialize)]
        struct RawLicenseFile {
            version: u32,
            issued_at: DateTime<Utc>,
            license: RawLicense,
        }

        let header: VersionHeader = serde_json::from_str(json)?;
        if header.version != Self::CURRENT_VERSION {
            return Err(LicenseError::UnsupportedVersion {
                found: header.version,
                expected: Self::CURRENT_VERSION,
            });
        }

        let raw: RawLicenseFile = serde_json::from_str(json)?;
        Ok(Self {
            version: raw.version,
            issued_at: raw.issued_at,
            license: License::try_from(raw.license)?,
        })
    }

    /// Serializes the record to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> LicenseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Storage backend for license files.
pub trait LicenseStore: Send + Sync {
    /// Writes `record` to `path`, replacing any existing file.
    fn save(&self, path: &Path, record: &LicenseFile) -> LicenseResult<()>;

    /// Reads the record stored at `path`.
    fn load(&self, path: &Path) -> LicenseResult<LicenseFile>;

    /// Returns true if a record exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// [`LicenseStore`] backed by the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLicenseStore;

impl LicenseStore for FileLicenseStore {
    fn save(&self, path: &Path, record: &LicenseFile) -> LicenseResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    LicenseError::Storage(format!(
                        "failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
                info!(path = %parent.display(), "Created license directory");
            }
        }

        fs::write(path, record.to_json()?)?;
        debug!(path = %path.display(), "Wrote license file");
        Ok(())
    }

    fn load(&self, path: &Path) -> LicenseResult<LicenseFile> {
        let json = fs::read_to_string(path)?;
        LicenseFile::from_json(&json)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Resolves the file a license should be written to.
///
/// A path that names an existing directory, ends with a separator, or has
/// no final file component gets [`DEFAULT_LICENSE_FILE_NAME`] appended.
#[must_use]
pub fn resolve_license_path(path: &Path) -> PathBuf {
    let raw = path.as_os_str().to_string_lossy();
    let names_directory = path.is_dir()
        || raw.ends_with('/')
        || raw.ends_with(MAIN_SEPARATOR)
        || path.file_name().is_none();

    if names_directory {
        path.join(DEFAULT_LICENSE_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Returns the default license location: `<data dir>/encryptico/license.lic`.
///
/// Falls back to the current directory when the platform has no data
/// directory.
#[must_use]
pub fn default_license_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(DEFAULT_LICENSE_FILE_NAME)
}
