//! Content fingerprints for job documents

use crate::document::Document;
use crate::error::Result;
use blake3::Hasher;

/// A hash value represented as a hex string
pub type HashValue = String;

/// blake3 digest of a document's JSON serialization.
///
/// Key order is preserved on parse, so two documents that differ only in key
/// order get different digests even though they compare equal.
pub fn digest_document(document: &Document) -> Result<HashValue> {
    let mut hasher = Hasher::new();
    serde_json::to_writer(&mut hasher, document.root())?;
    Ok(hasher.finalize().to_hex().to_string())
}
