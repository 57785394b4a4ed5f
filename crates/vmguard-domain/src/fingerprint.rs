use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for one violation.
///
/// Identity fields:
/// - resource identifier
/// - violation message
///
/// Each field is hashed behind its byte length, so a `|` or any other byte
/// inside an identifier cannot shift the boundary between fields.
///
/// Downstream log stores use it to deduplicate the same violation across
/// scheduled runs.
pub fn fingerprint_for_violation(resource_id: &str, message: &str) -> String {
    let mut hasher = Sha256::new();
    for field in [resource_id, message] {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }
    let digest = hasher.finalize();
    hex::encode(digest)
}
