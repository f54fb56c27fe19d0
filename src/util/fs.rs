//! Filesystem utilities.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents)
        .with_context(|| format!("failed to write file: {}", path.display()))
}

/// Move a file with rename, replacing the destination if it exists.
///
/// Rename does not replace an existing file on every platform; in that
/// case the destination is removed first and the rename retried.
pub fn replace_file(src: &Path, dst: &Path) -> Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(_) if dst.exists() => {
            fs::remove_file(dst)
                .with_context(|| format!("failed to remove file: {}", dst.display()))?;
            fs::rename(src, dst)
                .with_context(|| format!("failed to move {} to {}", src.display(), dst.display()))
        }
        Err(e) => Err(e)
            .with_context(|| format!("failed to move {} to {}", src.display(), dst.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_missing_parents() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b").join("c");

        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_write_string_creates_parent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sub").join("file.txt");

        write_string(&path, "content").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_replace_file_moves() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst.txt");
        fs::write(&src, "new").unwrap();

        replace_file(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn test_replace_file_overwrites_existing() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.txt");
        let dst = tmp.path().join("dst.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        replace_file(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
    }

    #[test]
    fn test_replace_file_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("missing.txt");
        let dst = tmp.path().join("dst.txt");

        assert!(replace_file(&src, &dst).is_err());
    }
}
