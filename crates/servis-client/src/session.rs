use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwapOption;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to read session file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write session file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Process-wide bearer token holder.
///
/// Cheap to clone; all clones share one token. A persistent store mirrors
/// the token into a file so a login survives across CLI invocations.
#[derive(Clone)]
pub struct SessionStore {
    token: Arc<ArcSwapOption<String>>,
    file: Option<Arc<PathBuf>>,
}

impl SessionStore {
    pub fn in_memory() -> Self {
        Self {
            token: Arc::new(ArcSwapOption::empty()),
            file: None,
        }
    }

    /// Open a file-backed store, loading a previously saved token if the
    /// file exists.
    pub fn persistent(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let token = match std::fs::read_to_string(&path) {
            Ok(content) => Some(content.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => return Err(SessionError::Read { path, source }),
        };
        Ok(Self {
            token: Arc::new(ArcSwapOption::from(token.map(Arc::new))),
            file: Some(Arc::new(path)),
        })
    }

    pub fn token(&self) -> Option<String> {
        self.token.load_full().map(|t| t.as_ref().clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.load().is_some()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref().map(PathBuf::as_path)
    }

    /// Start a session.
    pub fn set_token(&self, token: impl Into<String>) -> Result<(), SessionError> {
        let token = token.into();
        if let Some(path) = &self.file {
            write_file(path, &token)?;
        }
        self.token.store(Some(Arc::new(token)));
        Ok(())
    }

    /// End the session.
    pub fn clear(&self) -> Result<(), SessionError> {
        self.token.store(None);
        if let Some(path) = &self.file {
            match std::fs::remove_file(path.as_path()) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(SessionError::Write {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("file", &self.file)
            .finish()
    }
}

fn write_file(path: &Path, token: &str) -> Result<(), SessionError> {
    let wrap = |source| SessionError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, token).map_err(wrap)
}
