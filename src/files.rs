use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::{TEST_FILE_CONTENT, TEST_FILE_NAME};

/// Write `README.md` with the fixed test content into the current directory.
pub fn create_test_file() -> Result<PathBuf> {
    let path = PathBuf::from(TEST_FILE_NAME);
    fs::write(&path, TEST_FILE_CONTENT)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

pub fn append_to_file(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {} for appending", path.display()))?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
