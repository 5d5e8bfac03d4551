use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};
use std::{fs, path::Path};
use tracing::debug;

use crate::error::FetchError;

/// Write the full decoded weather document to `path`.
///
/// The file is overwritten in place (no temp-file swap), 4-space
/// indented, UTF-8 with non-ASCII characters kept literal.
pub fn save_payload(path: &Path, payload: &Value) -> Result<(), FetchError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    payload.serialize(&mut ser)?;

    fs::write(path, &buf).map_err(|source| FetchError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = buf.len(), "saved weather payload");

    Ok(())
}

/// Write raw image bytes to `path`, overwriting any existing file.
pub fn save_image(path: &Path, bytes: &[u8]) -> Result<(), FetchError> {
    fs::write(path, bytes).map_err(|source| FetchError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = bytes.len(), "saved weather card");

    Ok(())
}
