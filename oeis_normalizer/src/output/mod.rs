//! Serialized artifacts of a batch run
//!
//! A full run writes every normalized entry to a compact binary artifact
//! next to the source database. Large runs additionally get a reduced
//! artifact holding just the first entries, sized for quick experiments
//! that do not want to load the full dataset.

use crate::config::compile_time::artifacts::{REDUCED_ARTIFACT_SIZE, REDUCED_ARTIFACT_THRESHOLD};
use crate::entry::OeisEntry;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Errors raised while writing artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode entries: {0}")]
    Encode(#[from] bincode::Error),
}

/// Paths produced by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub full: PathBuf,
    pub reduced: Option<PathBuf>,
}

fn artifact_stem(database_path: &Path) -> PathBuf {
    database_path.with_extension("")
}

/// Write the binary artifacts for a completed run.
///
/// The full artifact is `<db-stem>.entries.bin`; when more than
/// [`REDUCED_ARTIFACT_THRESHOLD`] entries were produced, a reduced
/// `<db-stem>-10000.entries.bin` holding exactly the first
/// [`REDUCED_ARTIFACT_SIZE`] entries is written as well.
pub fn write_artifacts(
    entries: &[OeisEntry],
    database_path: &Path,
) -> Result<ArtifactPaths, ArtifactError> {
    let stem = artifact_stem(database_path);

    let full = stem.with_extension("entries.bin");
    write_binary(entries, &full)?;

    let reduced = if entries.len() > REDUCED_ARTIFACT_THRESHOLD {
        let mut name = stem.as_os_str().to_os_string();
        name.push(format!("-{}", REDUCED_ARTIFACT_SIZE));
        let path = PathBuf::from(name).with_extension("entries.bin");
        write_binary(&entries[..REDUCED_ARTIFACT_SIZE], &path)?;
        Some(path)
    } else {
        None
    };

    Ok(ArtifactPaths { full, reduced })
}

fn write_binary(entries: &[OeisEntry], path: &Path) -> Result<(), ArtifactError> {
    let file = File::create(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, entries)?;
    writer.flush().map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write entries as a JSON array, for consumers that prefer text.
pub fn write_json_entries(entries: &[OeisEntry], path: &Path) -> Result<(), ArtifactError> {
    let file = File::create(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, entries).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    writer.flush().map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a binary artifact back into entries.
pub fn read_artifact(path: &Path) -> Result<Vec<OeisEntry>, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bincode::deserialize_from(std::io::BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Offset;

    fn entry(sequence_id: u32) -> OeisEntry {
        OeisEntry::new(
            sequence_id,
            None,
            vec![1, 2, 3],
            format!("Entry {}", sequence_id),
            Some(Offset::new(1, 3)),
            vec!["nonn".to_string()],
        )
    }

    #[test]
    fn test_full_artifact_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("oeis.sqlite3");
        let entries: Vec<OeisEntry> = (1..=5).map(entry).collect();

        let paths = write_artifacts(&entries, &db_path).unwrap();
        assert_eq!(paths.full, dir.path().join("oeis.entries.bin"));
        assert_eq!(paths.reduced, None);

        let back = read_artifact(&paths.full).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn test_reduced_artifact_written_above_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("oeis.sqlite3");
        let entries: Vec<OeisEntry> = (1..=(REDUCED_ARTIFACT_THRESHOLD as u32 + 1))
            .map(entry)
            .collect();

        let paths = write_artifacts(&entries, &db_path).unwrap();
        let reduced_path = paths.reduced.expect("reduced artifact expected");
        assert_eq!(
            reduced_path,
            dir.path()
                .join(format!("oeis-{}.entries.bin", REDUCED_ARTIFACT_SIZE))
        );

        let reduced = read_artifact(&reduced_path).unwrap();
        assert_eq!(reduced.len(), REDUCED_ARTIFACT_SIZE);
        assert_eq!(reduced[0].sequence_id, 1);
        assert_eq!(
            reduced.last().unwrap().sequence_id,
            REDUCED_ARTIFACT_SIZE as u32
        );
    }

    #[test]
    fn test_json_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        let entries = vec![entry(45)];

        write_json_entries(&entries, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<OeisEntry> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, entries);
    }
}
