use std::fs;
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::credential::Credential;
use crate::error::{Result, ToyotaError};

/// File name of the credential cache under `~/.cache`.
pub const CACHE_FILE_NAME: &str = "toyota_credentials_cache_contains_secrets";

/// Storage abstraction for the persisted credential.
///
/// `load` never fails: unreadable or foreign caches are reported as absent so a
/// fresh login can proceed.
pub trait TokenStore: Send + Sync {
    fn load(&self, username: &str) -> Option<Credential>;
    fn save(&self, credential: &Credential) -> Result<()>;
}

/// Single-file JSON credential cache.
///
/// # Example
/// ```no_run
/// use chrono::{Duration, Utc};
/// use mytoyota::auth::{Credential, FileTokenStore, TokenStore};
///
/// let store = FileTokenStore::new_default();
/// let credential = Credential {
///     access_token: "access".to_string(),
///     refresh_token: "refresh".to_string(),
///     uuid: "uuid".to_string(),
///     expiration: Utc::now() + Duration::hours(1),
///     username: "driver@example.com".to_string(),
/// };
/// store.save(&credential)?;
/// assert!(store.load("driver@example.com").is_some());
/// # Ok::<(), mytoyota::ToyotaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn new_default() -> Self {
        Self::new(Self::default_path())
    }

    /// `<home>/.cache/toyota_credentials_cache_contains_secrets`.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".cache"))
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join(CACHE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, username: &str) -> Option<Credential> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Ignoring unreadable credential cache");
                return None;
            }
        };
        let credential: Credential = match serde_json::from_str(&raw) {
            Ok(credential) => credential,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Ignoring corrupt credential cache");
                return None;
            }
        };
        if credential.username != username {
            debug!(path = %self.path.display(), "Credential cache belongs to another user");
            return None;
        }
        Some(credential)
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        let serialized = serde_json::to_vec_pretty(credential)?;
        atomic_write(&self.path, &serialized)
    }
}

/// Stage the data in a 0600 temp file next to `path`, fsync, then persist over it.
fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if path.file_name().is_none() {
        return Err(ToyotaError::Configuration(format!(
            "Credential cache path {} has no file name",
            path.display()
        )));
    }
    fs::create_dir_all(parent)?;

    let mut staged = NamedTempFile::new_in(parent)?;
    #[cfg(unix)]
    staged
        .as_file()
        .set_permissions(fs::Permissions::from_mode(0o600))?;
    staged.write_all(data)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|err| ToyotaError::Io(err.error))?;
    Ok(())
}
