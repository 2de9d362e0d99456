//! GeoJSON file output.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::stations::FeatureCollection;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "gasolineras.geojson";

/// Errors that can occur while writing the output file.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// Filesystem operation failed
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serialization failed
    #[error("failed to serialize GeoJSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Render a collection as indented UTF-8 JSON with a trailing newline.
///
/// Non-ASCII characters are written verbatim, not escaped.
fn render_geojson(collection: &FeatureCollection) -> Result<Vec<u8>, OutputError> {
    let mut buf = serde_json::to_vec_pretty(collection)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write a collection to `path`, replacing any existing file.
///
/// The data goes to a temporary file in the same directory which is then
/// renamed over `path`, so a failed write leaves the old file intact.
/// Creates parent directories if they don't exist.
pub fn write_geojson(collection: &FeatureCollection, path: &Path) -> Result<(), OutputError> {
    let io_err = |source: std::io::Error| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let bytes = render_geojson(collection)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }

    let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
    file.write_all(&bytes).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
