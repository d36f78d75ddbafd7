//! Version hashes for catalog documents.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of the document's compact JSON form.
///
/// Object keys serialize in sorted order, so two documents with the same
/// content always hash the same.
#[must_use]
pub fn version_hash(body: &serde_json::Value) -> String {
    format!("{:x}", Sha256::digest(body.to_string().as_bytes()))
}
