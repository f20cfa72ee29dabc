//! Saving and loading figure documents on disk.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::figure::Figure;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// On-disk document format. The version field lets a future format change
/// reject old files with a clear error instead of a parse failure.
#[derive(Serialize, Deserialize)]
struct FileDocument {
    version: u32,
    figures: Vec<Figure>,
}

const FORMAT_VERSION: u32 = 1;

pub fn save(path: &Path, figures: &[Figure]) -> Result<(), StorageError> {
    let doc = FileDocument {
        version: FORMAT_VERSION,
        figures: figures.to_vec(),
    };
    let json = serde_json::to_string_pretty(&doc)?;
    fs::write(path, json)?;
    info!("saved {} figures to {}", figures.len(), path.display());
    Ok(())
}

pub fn load(path: &Path) -> Result<Vec<Figure>, StorageError> {
    let json = fs::read_to_string(path)?;
    let doc: FileDocument = serde_json::from_str(&json)?;
    debug!(
        "loaded {} figures (format v{}) from {}",
        doc.figures.len(),
        doc.version,
        path.display()
    );
    Ok(doc.figures)
}
