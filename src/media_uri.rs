//! Turning the player's `file://` URIs into filesystem paths.

use std::path::PathBuf;

use crate::error::{Error, Result};

const FILE_SCHEME: &str = "file://";

/// Decode a media URI as reported by the player into a local path.
///
/// The `file://` prefix is dropped, `+` stands for a space, and the rest is
/// percent-decoded as UTF-8. `%2B` therefore still yields a literal `+`.
pub fn decode_uri(uri: &str) -> Result<PathBuf> {
    let raw = uri.strip_prefix(FILE_SCHEME).unwrap_or(uri);
    let spaced = raw.replace('+', " ");

    let decoded = urlencoding::decode(&spaced).map_err(|e| Error::InvalidUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;

    if decoded.is_empty() {
        return Err(Error::InvalidUri {
            uri: uri.to_string(),
            reason: "empty path".to_string(),
        });
    }

    Ok(PathBuf::from(decoded.into_owned()))
}
