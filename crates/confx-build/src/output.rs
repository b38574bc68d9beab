use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes rendered Dockerfile content to `path`.
///
/// Parent directories are created as needed. Without `overwrite` the file is
/// opened with `create_new`, so an existing file is never replaced, even one
/// created between the caller's checks and this call.
pub fn write_dockerfile(path: &Path, content: &[u8], overwrite: bool) -> Result<(), OutputError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(OutputError::AlreadyExists(path.to_path_buf()));
        }
        Err(e) => {
            return Err(OutputError::Write {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    tracing::debug!(path = %path.display(), bytes = content.len(), "writing Dockerfile");
    file.write_all(content).map_err(|e| OutputError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create directory {path}")]
    CreateDir { path: PathBuf, source: std::io::Error },
    #[error("{0} already exists; pass --force to overwrite")]
    AlreadyExists(PathBuf),
    #[error("failed to write {path}")]
    Write { path: PathBuf, source: std::io::Error },
}
