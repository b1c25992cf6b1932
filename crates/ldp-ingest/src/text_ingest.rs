//! Plain-text loading for unstructured sources (feedback exports).

use std::path::Path;

use crate::csv_ingest::{check_exists, check_extension};
use crate::error::{IngestError, Result};

/// Load a `.txt` file as a vector of lines.
pub fn load_text(path: &Path) -> Result<Vec<String>> {
    check_extension(path, "txt")?;
    check_exists(path)?;

    let content = std::fs::read_to_string(path).map_err(|e| IngestError::FileAccess {
        path: path.to_path_buf(),
        source: e,
    })?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    tracing::info!(path = %path.display(), lines = lines.len(), "loaded text");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.txt");
        std::fs::write(&path, "Feedback #1\n- Central Branch ~ 4⭐\n").unwrap();
        let lines = load_text(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Feedback #1");
    }

    #[test]
    fn wrong_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.csv");
        std::fs::write(&path, "x\n").unwrap();
        assert!(matches!(
            load_text(&path).unwrap_err(),
            IngestError::UnsupportedExtension { .. }
        ));
    }
}
