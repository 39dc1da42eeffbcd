//! The downloadable file set
//!
//! Files are served from a single flat directory. Names coming from the URL
//! are only ever joined onto that directory after `resolve` has rejected
//! anything that could walk out of it.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Regular files in the download directory, sorted by name
///
/// A missing directory is treated as an empty catalog.
pub async fn list_files(dir: &Path) -> Result<Vec<String>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Download directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            files.push(name.to_string());
        }
    }
    files.sort();

    Ok(files)
}

/// Join a requested file name onto the download directory
///
/// Returns `None` for names that are not a single plain path component.
pub fn resolve(dir: &Path, name: &str) -> Option<PathBuf> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0'])
    {
        return None;
    }

    Some(dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_plain_name() {
        let dir = Path::new("/srv/downloads");
        assert_eq!(
            resolve(dir, "sauce-v1.zip"),
            Some(PathBuf::from("/srv/downloads/sauce-v1.zip"))
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = Path::new("/srv/downloads");

        assert_eq!(resolve(dir, ""), None);
        assert_eq!(resolve(dir, "."), None);
        assert_eq!(resolve(dir, ".."), None);
        assert_eq!(resolve(dir, "../etc/passwd"), None);
        assert_eq!(resolve(dir, "/etc/passwd"), None);
        assert_eq!(resolve(dir, "..\\secret.txt"), None);
        assert_eq!(resolve(dir, "a\0b"), None);
    }

    #[test]
    fn test_resolve_allows_dots_inside_names() {
        let dir = Path::new("/srv/downloads");
        assert!(resolve(dir, "..hidden").is_some());
        assert!(resolve(dir, "archive.tar.gz").is_some());
    }

    #[tokio::test]
    async fn test_list_files_sorted_and_skips_dirs() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("b.zip"), b"b").unwrap();
        std::fs::write(temp_dir.path().join("a.pdf"), b"a").unwrap();
        std::fs::create_dir(temp_dir.path().join("nested")).unwrap();

        let files = list_files(temp_dir.path()).await.unwrap();

        assert_eq!(files, vec!["a.pdf".to_string(), "b.zip".to_string()]);
    }

    #[tokio::test]
    async fn test_list_files_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let files = list_files(&temp_dir.path().join("nope")).await.unwrap();
        assert!(files.is_empty());
    }
}
