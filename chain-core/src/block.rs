//! Tamper-evident block
//!
//! A block's hash is computed once, at construction, over:
//!
//! ```text
//! index || "-" || created_at (RFC 3339, nanoseconds) || "-" || payload || "-" || predecessor_hash
//! ```
//!
//! The genesis block uses [`GENESIS_PREDECESSOR_HASH`] in place of a
//! predecessor hash. Fields are private and there are no setters, so the
//! stored hash always matches a recomputation unless a block was forged
//! through the test-only constructors.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::GENESIS_PREDECESSOR_HASH;

/// A single immutable block in the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    /// Position in the chain (genesis = 0)
    index: u64,

    /// Caller-supplied content
    payload: String,

    /// UTC time the block was constructed
    created_at: DateTime<Utc>,

    /// Arena position of the preceding block, `None` for genesis
    predecessor: Option<u64>,

    /// Hash of the preceding block as recorded at construction
    predecessor_hash: String,

    /// Hex-encoded SHA-256 of this block
    hash: String,
}

impl Block {
    /// Create a block stamped with the current wall-clock time
    pub fn new(index: u64, payload: impl Into<String>, predecessor: Option<&Block>) -> Self {
        Self::at(index, payload, predecessor, Utc::now())
    }

    /// Create a block stamped with an explicit creation time
    ///
    /// `index` is not checked against `predecessor`; the chain service is
    /// responsible for sequencing.
    pub fn at(
        index: u64,
        payload: impl Into<String>,
        predecessor: Option<&Block>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let payload = payload.into();
        let predecessor_hash = predecessor
            .map(|p| p.hash.clone())
            .unwrap_or_else(|| GENESIS_PREDECESSOR_HASH.to_string());
        let hash = compute_hash(index, &created_at, &payload, &predecessor_hash);

        Self {
            index,
            payload,
            created_at,
            predecessor: predecessor.map(|p| p.index),
            predecessor_hash,
            hash,
        }
    }

    /// Position in the chain
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Block content
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Creation time (UTC)
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Arena position of the predecessor, `None` for genesis
    pub fn predecessor(&self) -> Option<u64> {
        self.predecessor
    }

    /// Predecessor hash recorded at construction (`"0"` for genesis)
    pub fn predecessor_hash(&self) -> &str {
        &self.predecessor_hash
    }

    /// Stored hash of this block
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// True if this block has no predecessor
    pub fn is_genesis(&self) -> bool {
        self.predecessor.is_none()
    }

    /// Recompute the hash from the current field values
    pub fn compute_hash(&self) -> String {
        compute_hash(
            self.index,
            &self.created_at,
            &self.payload,
            &self.predecessor_hash,
        )
    }

    /// True if the stored hash no longer matches the field values
    pub fn is_tampered(&self) -> bool {
        self.hash != self.compute_hash()
    }
}

/// Forging helpers for tamper simulation
///
/// Each returns a copy that keeps the source block's stored hash (or overrides
/// it), so the copy is inconsistent by construction.
#[cfg(test)]
impl Block {
    pub(crate) fn forged_payload(&self, payload: &str) -> Self {
        Self {
            payload: payload.to_string(),
            ..self.clone()
        }
    }

    pub(crate) fn forged_hash(&self, hash: &str) -> Self {
        Self {
            hash: hash.to_string(),
            ..self.clone()
        }
    }

    pub(crate) fn forged_created_at(&self, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            ..self.clone()
        }
    }

    /// Strip the predecessor and reseal, producing a self-consistent block
    /// that claims to be a root.
    pub(crate) fn detached(&self) -> Self {
        let mut block = Self {
            predecessor: None,
            ..self.clone()
        };
        block.hash = block.compute_hash();
        block
    }
}

/// Format a timestamp the way it enters the hash
pub(crate) fn timestamp_text(created_at: &DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn compute_hash(
    index: u64,
    created_at: &DateTime<Utc>,
    payload: &str,
    predecessor_hash: &str,
) -> String {
    let raw = format!(
        "{}-{}-{}-{}",
        index,
        timestamp_text(created_at),
        payload,
        predecessor_hash
    );

    let mut hasher = Sha256::new();
    hasher.update(raw.as_bytes());
    hex::encode(hasher.finalize())
}
