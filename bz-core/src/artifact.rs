use bz_domain::ConversionTable;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Failed to serialize the conversion table: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{} is not a valid conversion table: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Replaces the file at `path` with the serialized table. The previous file stays untouched if anything fails.
pub fn write_conversion_table(path: &Path, table: &ConversionTable) -> Result<(), ArtifactError> {
    let json = table.to_pretty_json()?;

    write_atomically(path, json.as_bytes()).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Saved {} conversions to {}", table.len(), path.display());

    Ok(())
}

pub fn read_conversion_table(path: &Path) -> Result<ConversionTable, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    ConversionTable::from_json(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);

    fs::write(&temp_path, contents)?;

    fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp_path);
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut temp_path: OsString = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    PathBuf::from(temp_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bz_domain::{build_conversion_table, ProductId};

    fn sample_table() -> ConversionTable {
        build_conversion_table(vec![ProductId::from("SHARD_GOBLIN"), ProductId::from("ROUGH_AMBER_GEM")], &[]).table
    }

    #[test]
    fn written_table_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("conversions.json");

        write_conversion_table(&path, &sample_table()).unwrap();

        assert_eq!(read_conversion_table(&path).unwrap(), sample_table());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn overwrites_previous_output_completely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversions.json");
        fs::write(&path, "{\n    \"STALE_ENTRY\": \"Stale\",\n    \"ZZZ\": \"Zzz\"\n}").unwrap();

        write_conversion_table(&path, &sample_table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "{\n    \"ROUGH_AMBER_GEM\": \"⸕ Rough Amber Gemstone\",\n    \"SHARD_GOBLIN\": \"Goblin Shard\"\n}"
        );
    }

    #[test]
    fn failed_write_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        // a directory can't be replaced by a file
        let path = dir.path().join("conversions.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "keep").unwrap();

        let err = write_conversion_table(&path, &sample_table()).unwrap_err();

        assert!(matches!(err, ArtifactError::Write { .. }));
        assert!(path.join("keep").exists());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn reading_garbage_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversions.json");
        fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(read_conversion_table(&path), Err(ArtifactError::Parse { .. })));
    }
}
