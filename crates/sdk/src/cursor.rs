//! Opaque pagination cursor codec.
//!
//! A cursor carries the offset to resume a listing at, bound to a
//! fingerprint of the filter parameters that produced it. Callers must
//! treat tokens as opaque; decoding a malformed or foreign token is an
//! `Invalid` error, never a panic.

use crate::error::{QualerError, QualerResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Token format version tag.
const PREFIX: &str = "qlr1";

/// A decoded pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Offset into the unfiltered remote listing.
    pub offset: u64,
    /// Fingerprint of the filter parameters the cursor was issued under.
    pub fingerprint: String,
}

impl Cursor {
    /// Verify that this cursor was issued under the given filters.
    /// A mismatch means the caller changed filters between pages.
    pub fn verify(&self, expected_fingerprint: &str) -> QualerResult<()> {
        if self.fingerprint != expected_fingerprint {
            return Err(QualerError::Invalid(
                "cursor does not match the supplied filters; \
                 restart the listing without a cursor"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Derive a fingerprint binding a cursor to its filter parameters.
///
/// Absent filters hash differently from empty-string filters, and the
/// key order is fixed by the caller, so equal filter sets always produce
/// equal fingerprints.
pub fn fingerprint(parts: &[(&str, Option<&str>)]) -> String {
    let mut hasher = Sha256::new();
    for (key, value) in parts {
        hasher.update(key.as_bytes());
        hasher.update([0x00]);
        match value {
            Some(v) => {
                hasher.update([0x01]);
                hasher.update(v.as_bytes());
            }
            None => hasher.update([0x02]),
        }
        hasher.update([0x0a]);
    }
    hex::encode(&hasher.finalize()[..16])
}

/// Encode an offset and filter fingerprint into an opaque token.
pub fn encode(offset: u64, fingerprint: &str) -> String {
    URL_SAFE_NO_PAD.encode(format!("{}:{}:{}", PREFIX, offset, fingerprint))
}

/// Decode an opaque token. Malformed input of any shape is `Invalid`.
pub fn decode(token: &str) -> QualerResult<Cursor> {
    let invalid = || QualerError::Invalid("malformed pagination cursor".to_string());

    let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
    let text = String::from_utf8(bytes).map_err(|_| invalid())?;

    let mut parts = text.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(PREFIX), Some(offset), Some(fp)) if !fp.is_empty() => Ok(Cursor {
            offset: offset.parse().map_err(|_| invalid())?,
            fingerprint: fp.to_string(),
        }),
        _ => Err(invalid()),
    }
}
