//! Catalog snapshots in `MessagePack`.
//!
//! A snapshot is the whole catalog: every kind with its entries, tags and
//! fields. Named serialization keeps struct field names in the encoding so
//! snapshots survive field reordering.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use muster_foundation::{Error, Result};
use tracing::info;

use crate::catalog::{Catalog, RawCatalog};

/// Encodes a catalog as `MessagePack` bytes.
///
/// # Errors
///
/// Returns a serialization error if encoding fails.
pub fn to_bytes(catalog: &Catalog) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(catalog).map_err(|e| Error::serialization(e.to_string()))
}

/// Decodes a catalog from `MessagePack` bytes.
///
/// Entries are re-inserted one by one, so the usual uniqueness rules apply.
///
/// # Errors
///
/// Returns a serialization error if the bytes are not a catalog snapshot, a
/// duplicate-ID error if a kind repeats an ID (ignoring case), or an
/// invalid-argument error if two collections answer to the same kind name.
pub fn from_bytes(bytes: &[u8]) -> Result<Catalog> {
    let raw: RawCatalog =
        rmp_serde::from_slice(bytes).map_err(|e| Error::serialization(e.to_string()))?;
    Catalog::try_from(raw)
}

/// Writes a snapshot to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written, or a serialization
/// error if encoding fails.
pub fn save_to_file<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(catalog)?;

    let file = File::create(path)
        .map_err(|e| Error::io(format!("failed to create file '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io(format!("failed to write file '{}': {e}", path.display())))?;

    info!(path = %path.display(), bytes = bytes.len(), "saved snapshot");
    Ok(())
}

/// Reads a snapshot from `path`.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or any error of
/// [`from_bytes`].
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| Error::io(format!("failed to open file '{}': {e}", path.display())))?;

    let mut bytes = Vec::new();
    BufReader::new(file)
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;

    let catalog = from_bytes(&bytes)?;
    info!(path = %path.display(), kinds = catalog.collections().count(), "loaded snapshot");
    Ok(catalog)
}
