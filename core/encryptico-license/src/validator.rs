//! Two-mode license validator.
//!
//! A [`Validator`] either holds license material directly (to verify it or
//! write it out as a license file) or points at a license file on disk (to
//! verify what is stored there).

use crate::error::{LicenseError, LicenseResult};
use crate::license::License;
use crate::store::{resolve_license_path, FileLicenseStore, LicenseFile, LicenseStore};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where a validator gets its license from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorMode {
    /// License material supplied by the caller.
    Direct(License),
    /// A license file to load on demand.
    FromFile(PathBuf),
}

/// Verifies license keys and license files.
#[derive(Debug, Clone)]
pub struct Validator<S = FileLicenseStore> {
    mode: ValidatorMode,
    store: S,
}

impl Validator<FileLicenseStore> {
    /// Creates a validator for explicit license material.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the key or password is empty, or if
    /// `iterations` or `salt_length` is zero.
    pub fn new(
        key: impl Into<String>,
        password: impl Into<String>,
        iterations: u32,
        salt_length: usize,
    ) -> LicenseResult<Self> {
        let license = License::new(key, password, iterations, salt_length)?;
        Ok(Self::with_store(
            ValidatorMode::Direct(license),
            FileLicenseStore,
        ))
    }

    /// Creates a validator for a license file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the path is empty.
    pub fn from_file(path: impl Into<PathBuf>) -> LicenseResult<Self> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(LicenseError::InvalidArgument(
                "license file path must not be empty".to_string(),
            ));
        }
        Ok(Self::with_store(ValidatorMode::FromFile(path), FileLicenseStore))
    }
}

impl From<License> for Validator<FileLicenseStore> {
    fn from(license: License) -> Self {
        Self::with_store(ValidatorMode::Direct(license), FileLicenseStore)
    }
}

impl<S: LicenseStore> Validator<S> {
    /// Creates a validator backed by a custom store.
    pub fn with_store(mode: ValidatorMode, store: S) -> Self {
        Self { mode, store }
    }

    /// Returns the validator's mode.
    pub fn mode(&self) -> &ValidatorMode {
        &self.mode
    }

    /// Returns the license held in direct mode.
    pub fn license(&self) -> Option<&License> {
        match &self.mode {
            ValidatorMode::Direct(license) => Some(license),
            ValidatorMode::FromFile(_) => None,
        }
    }

    /// Verifies the license material held by this validator.
    ///
    /// A file-backed validator holds no key material and always returns
    /// `false`; use [`Validator::is_local_license_valid`] instead.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match &self.mode {
            ValidatorMode::Direct(license) => license.is_valid(),
            ValidatorMode::FromFile(path) => {
                debug!(path = %path.display(), "No key material in file mode");
                false
            }
        }
    }

    /// Returns true if the store holds a license at this validator's file
    /// path. Always false in direct mode.
    #[must_use]
    pub fn has_local_license(&self) -> bool {
        match &self.mode {
            ValidatorMode::FromFile(path) => self.store.exists(path),
            ValidatorMode::Direct(_) => false,
        }
    }

    /// Loads the license file and verifies it.
    ///
    /// Returns `Ok(false)` if the file does not exist or holds a key that
    /// does not verify.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a direct-mode validator, and a storage,
    /// I/O, serialization or version error if the file cannot be read as a
    /// license record.
    pub fn is_local_license_valid(&self) -> LicenseResult<bool> {
        let path = match &self.mode {
            ValidatorMode::FromFile(path) => path,
            ValidatorMode::Direct(_) => {
                return Err(LicenseError::InvalidArgument(
                    "validator has no license file path".to_string(),
                ));
            }
        };

        if !self.has_local_license() {
            debug!(path = %path.display(), "License file not found");
            return Ok(false);
        }

        let record = self.store.load(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to load license file");
        })?;

        let valid = record.license.is_valid();
        if !valid {
            warn!(path = %path.display(), "License file holds an invalid key");
        }
        Ok(valid)
    }

    /// Writes the held license to a license file and returns its path.
    ///
    /// If `path` names a directory the file is called `license.lic`.
    /// Missing directories are created.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a file-backed validator, or the store's
    /// error if the file cannot be written.
    pub fn generate_license(&self, path: impl AsRef<Path>) -> LicenseResult<PathBuf> {
        let license = self.license().ok_or_else(|| {
            LicenseError::InvalidArgument("validator holds no license to write".to_string())
        })?;

        let target = resolve_license_path(path.as_ref());
        self.store.save(&target, &LicenseFile::new(license.clone()))?;

        info!(path = %target.display(), "Issued license file");
        Ok(target)
    }
}
