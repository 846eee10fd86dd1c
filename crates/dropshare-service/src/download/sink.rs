//! Destinations for downloaded files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use dropshare_core::error::{AppError, ErrorKind};
use dropshare_core::result::AppResult;

/// Receives a downloaded file under its original name.
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Store `data` as `name`.
    async fn save(&self, name: &str, data: Bytes) -> AppResult<()>;
}

/// Saves files into a directory, never overwriting.
///
/// A taken name gets a ` (n)` suffix before the extension, as browsers do.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Save into `dir`, creating it if needed.
    pub async fn create(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create {}: {e}", dir.display()),
                e,
            )
        })?;
        Ok(Self { dir })
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create a new file for `name`, moving to the next free suffix while
    /// the name is taken.
    async fn create_file(&self, name: &str) -> AppResult<(PathBuf, fs::File)> {
        let file_name = Path::new(name)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "download".to_string());
        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), format!(".{ext}")),
            _ => (file_name.clone(), String::new()),
        };

        let mut n = 0;
        loop {
            let path = if n == 0 {
                self.dir.join(&file_name)
            } else {
                self.dir.join(format!("{stem} ({n}){ext}"))
            };
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => n += 1,
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create {}: {e}", path.display()),
                        e,
                    ));
                }
            }
        }
    }
}

#[async_trait]
impl FileSink for DirectorySink {
    async fn save(&self, name: &str, data: Bytes) -> AppResult<()> {
        let (path, mut file) = self.create_file(name).await?;
        let written = match file.write_all(&data).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        written.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write {}: {e}", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), bytes = data.len(), "Saved download");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_existing_names_get_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::create(dir.path()).await.unwrap();

        sink.save("a.txt", Bytes::from("1")).await.unwrap();
        sink.save("a.txt", Bytes::from("2")).await.unwrap();
        sink.save("a.txt", Bytes::from("3")).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.txt")).unwrap(), b"1");
        assert_eq!(std::fs::read(dir.path().join("a (1).txt")).unwrap(), b"2");
        assert_eq!(std::fs::read(dir.path().join("a (2).txt")).unwrap(), b"3");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_never_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::create(dir.path()).await.unwrap();

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..20 {
            let sink = sink.clone();
            tasks.spawn(async move { sink.save("same.txt", Bytes::from(i.to_string())).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let mut contents: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| std::fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        contents.sort_by_key(|c| c.parse::<u32>().unwrap());
        let expected: Vec<String> = (0..20).map(|i| i.to_string()).collect();
        assert_eq!(contents, expected);
    }

    #[tokio::test]
    async fn test_names_cannot_leave_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::create(dir.path().join("out")).await.unwrap();

        sink.save("../escape.txt", Bytes::from("x")).await.unwrap();
        assert!(dir.path().join("out/escape.txt").is_file());
        assert!(!dir.path().join("escape.txt").exists());
    }
}
