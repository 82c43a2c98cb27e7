//! JSON-file backed edge source.
//!
//! # On-Disk Format
//!
//! A single JSON array of `{"first_city", "second_city", "distance"}` objects in
//! first-stored order. Every mutation rewrites the whole file through a
//! temporary sibling followed by a rename, so a crash leaves either the old or
//! the new file in place. A batch upsert is one mutation.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::Result;
use crate::graph::Distance;

use super::{EdgeRecords, EdgeSource};

/// Edge source persisted to a JSON file.
///
/// Reads are served from memory; writes go to disk before they become
/// visible, so a failed write leaves the in-memory records untouched.
#[derive(Debug)]
pub struct JsonFileEdgeSource {
    path: PathBuf,
    records: RwLock<EdgeRecords>,
}

impl JsonFileEdgeSource {
    /// Opens the store at `path`, starting empty if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read, or `Error::Json` if it
    /// is corrupted or holds an invalid record.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let distances: Vec<Distance> = serde_json::from_reader(reader)?;
            EdgeRecords::from_distances(&distances)
        } else {
            EdgeRecords::default()
        };

        tracing::info!(
            path = %path.display(),
            records = records.len(),
            "Opened edge file"
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &EdgeRecords) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp_path)?);
            serde_json::to_writer_pretty(&mut writer, &records.to_distances()?)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn write_with<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut EdgeRecords),
    {
        let mut records = self.records.write();
        let mut next = records.clone();
        change(&mut next);
        self.persist(&next)?;
        *records = next;
        Ok(())
    }
}

impl EdgeSource for JsonFileEdgeSource {
    fn list_all_edges(&self) -> Result<Vec<Distance>> {
        self.records.read().to_distances()
    }

    fn find_edge(&self, first: &str, second: &str) -> Result<Option<u64>> {
        Ok(self.records.read().get(first, second))
    }

    fn upsert_edge(&self, first: &str, second: &str, distance: u64) -> Result<()> {
        let record = Distance::new(first, second, distance)?;
        self.write_with(|records| records.upsert(&record))
    }

    /// Applies the whole batch with a single file rewrite.
    fn upsert_edges(&self, edges: &[Distance]) -> Result<()> {
        self.write_with(|records| {
            for edge in edges {
                records.upsert(edge);
            }
        })
    }

    fn delete_all_edges(&self) -> Result<()> {
        self.write_with(EdgeRecords::clear)
    }

    fn edge_count(&self) -> Result<usize> {
        Ok(self.records.read().len())
    }
}
