/// Password file discovery, permission checks and reading

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{PGPASSFILE_ENV, PGPASS_FILE_NAME};
use crate::error::PgPassError;

/// Source of raw password file text
pub trait PassFileSource {
    /// Whether the source rejects files readable by group or others
    fn supports_permission_check(&self) -> bool;

    /// Path shown in logs and errors
    fn path(&self) -> &Path;

    fn read_contents(&self) -> Result<String, PgPassError>;
}

/// Password file on disk
#[derive(Debug, Clone)]
pub struct PassFile {
    path: PathBuf,
    check_permissions: bool,
}

impl PassFile {
    /// Path from `PGPASSFILE`, or `.pgpass` in the home directory
    pub fn resolve_path() -> Result<PathBuf, PgPassError> {
        if let Some(path) = env::var_os(PGPASSFILE_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        dirs::home_dir()
            .map(|home| home.join(PGPASS_FILE_NAME))
            .ok_or(PgPassError::HomeNotFound)
    }

    pub fn from_env() -> Result<Self, PgPassError> {
        Ok(Self::at(Self::resolve_path()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            check_permissions: cfg!(unix),
        }
    }

    /// Read the file without rejecting group or world readable permissions
    pub fn without_permission_check(mut self) -> Self {
        self.check_permissions = false;
        self
    }

    #[cfg(unix)]
    fn verify_permissions(&self) -> Result<(), PgPassError> {
        use crate::config::{GROUP_READ_BIT, OTHER_READ_BIT};
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(&self.path).map_err(|source| PgPassError::Io {
            path: self.path.clone(),
            source,
        })?;
        let mode = metadata.permissions().mode() & 0o7777;

        if mode & GROUP_READ_BIT != 0 || mode & OTHER_READ_BIT != 0 {
            return Err(PgPassError::InvalidPermissions {
                path: self.path.clone(),
                mode: format!("{:#o}", mode),
            });
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn verify_permissions(&self) -> Result<(), PgPassError> {
        Ok(())
    }
}

impl PassFileSource for PassFile {
    fn supports_permission_check(&self) -> bool {
        cfg!(unix) && self.check_permissions
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Result<String, PgPassError> {
        if !self.path.exists() {
            return Err(PgPassError::FileNotFound(self.path.clone()));
        }

        if self.supports_permission_check() {
            self.verify_permissions()?;
        }

        fs::read_to_string(&self.path).map_err(|source| PgPassError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
