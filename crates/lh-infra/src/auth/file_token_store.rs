//! File-based access token store
//!
//! Persists the signed-in session as a JSON file in the application data
//! directory.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use lh_core::ports::{StoredToken, TokenStoreError, TokenStorePort};

pub const DEFAULT_TOKEN_FILE: &str = "auth_token.json";

pub struct FileTokenStore {
    token_file_path: PathBuf,
}

impl FileTokenStore {
    /// Create store with custom file path
    pub fn new(token_file_path: PathBuf) -> Self {
        Self { token_file_path }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            token_file_path: base_dir.join(DEFAULT_TOKEN_FILE),
        }
    }

    /// `<local data dir>/learnhub/auth_token.json`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join("learnhub").join(DEFAULT_TOKEN_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.token_file_path
    }

    async fn ensure_parent_dir(&self) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.token_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Open the token file for writing, readable by the owner only before
    /// any byte of the token lands in it.
    async fn open_private(&self) -> std::io::Result<fs::File> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // `mode` only applies to new files; narrow a pre-existing one first.
            match fs::set_permissions(&self.token_file_path, std::fs::Permissions::from_mode(0o600))
                .await
            {
                Ok(()) => {}
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err),
            }
            options.mode(0o600);
        }

        options.open(&self.token_file_path).await
    }
}

#[async_trait]
impl TokenStorePort for FileTokenStore {
    async fn load(&self) -> Result<Option<StoredToken>, TokenStoreError> {
        let content = match fs::read_to_string(&self.token_file_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let token: StoredToken = serde_json::from_str(&content)
            .map_err(|e| TokenStoreError::Corrupt(format!("failed to parse token file: {e}")))?;

        Ok(Some(token))
    }

    async fn save(&self, token: &StoredToken) -> Result<(), TokenStoreError> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(token)
            .map_err(|e| TokenStoreError::Corrupt(format!("failed to serialize token: {e}")))?;

        let mut file = self.open_private().await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;

        debug!(path = %self.token_file_path.display(), "access token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.token_file_path).await {
            Ok(()) => {
                debug!(path = %self.token_file_path.display(), "access token removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lh_core::account::{AuthenticatedUser, Role};
    use lh_core::ids::UserId;
    use tempfile::TempDir;

    fn sample_token() -> StoredToken {
        StoredToken {
            access_token: "jwt-abc".to_string(),
            user: AuthenticatedUser {
                id: UserId::from("u-1"),
                email: "kid@school.edu".to_string(),
                role: Role::Student,
                full_name: Some("Kid Example".to_string()),
            },
            saved_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn load_returns_none_when_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("missing.json"));

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_creates_parent_dirs_and_loads_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("nested/dir/token.json"));

        store.save(&sample_token()).await.unwrap();

        assert_eq!(store.load().await.unwrap(), Some(sample_token()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_defaults(temp_dir.path().to_path_buf());
        store.save(&sample_token()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn existing_world_readable_file_is_narrowed_on_save() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        fs::write(&path, "{}").await.unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(path.clone());
        store.save(&sample_token()).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().await.unwrap(), Some(sample_token()));
    }

    #[tokio::test]
    async fn empty_file_reads_as_signed_out() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        fs::write(&path, "  \n").await.unwrap();

        let store = FileTokenStore::new(path);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn garbage_is_reported_as_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        fs::write(&path, "{not json").await.unwrap();

        let store = FileTokenStore::new(path);
        assert!(matches!(
            store.load().await,
            Err(TokenStoreError::Corrupt(_))
        ));
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::with_defaults(temp_dir.path().to_path_buf());

        store.save(&sample_token()).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load().await.unwrap(), None);
    }
}
