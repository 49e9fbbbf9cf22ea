use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;

use crate::error::TestError;

/// Test environment backed by a temporary data directory.
///
/// Each collection lives in `<data_dir>/<collection>.json` as a JSON array, which is the layout
/// the local storage backend reads and writes. The directory is removed when the context is
/// dropped, so keep the context alive for the duration of the test.
pub struct TestContext {
    dir: TempDir,
}

impl TestContext {
    /// Creates a context with an empty temporary directory.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with no collection files yet
    /// - `Err(TestError::Io)` - Failed to create the temporary directory
    pub fn new() -> Result<Self, TestError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Directory to hand to the local storage backend.
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the JSON file holding `collection`.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.path().join(format!("{collection}.json"))
    }

    /// Reads every document of a collection, or an empty list when the file does not exist.
    pub fn read<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, TestError> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Replaces the contents of a collection.
    pub fn write<T: Serialize>(&self, collection: &str, items: &[T]) -> Result<(), TestError> {
        let json = serde_json::to_vec_pretty(items)?;
        std::fs::write(self.collection_path(collection), json)?;
        Ok(())
    }

    /// Appends one document to a collection.
    ///
    /// Documents are kept as raw JSON values while appending, so collections can be extended
    /// without knowing the concrete type of the documents already present.
    pub fn insert<T: Serialize>(&self, collection: &str, item: &T) -> Result<(), TestError> {
        let mut items: Vec<serde_json::Value> = self.read(collection)?;
        items.push(serde_json::to_value(item)?);
        self.write(collection, &items)
    }

    /// Overwrites a collection file with arbitrary text, e.g. to simulate corruption.
    pub fn write_raw(&self, collection: &str, contents: &str) -> Result<(), TestError> {
        std::fs::write(self.collection_path(collection), contents)?;
        Ok(())
    }
}
