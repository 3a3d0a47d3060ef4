//! Chain service: append and verification
//!
//! [`ChainService`] owns the block arena. It is the only thing that creates
//! non-genesis blocks, always by referencing the current tip, and it checks
//! the whole sequence on demand.
//!
//! Verification walks adjacent pairs `(previous, current)` front to back and
//! stops at the first failure of, in order:
//! 1. `current` integrity (stored hash matches recomputation)
//! 2. `previous` integrity
//! 3. linkage: sequential index, recorded predecessor hash, no timestamp
//!    later than the clock's current UTC time

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::clock::Clock;
use crate::config::ChainConfig;
use crate::error::{ChainError, Result};
use crate::GENESIS_PAYLOAD;

/// Reason a block or a pair of blocks failed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkFault {
    /// Block's stored hash doesn't match its fields
    Tampered,
    /// One side of the pair is absent
    MissingBlock,
    /// Current block has no predecessor reference
    MissingPredecessor,
    /// Current index is not previous index + 1
    IndexGap,
    /// Current block's recorded predecessor hash is not previous's hash
    PredecessorHashMismatch,
    /// A block is stamped later than the clock's current time
    FutureTimestamp,
    /// Current block is stamped before previous (strict mode only)
    TimestampRegression,
}

impl LinkFault {
    /// Stable snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkFault::Tampered => "tampered",
            LinkFault::MissingBlock => "missing_block",
            LinkFault::MissingPredecessor => "missing_predecessor",
            LinkFault::IndexGap => "index_gap",
            LinkFault::PredecessorHashMismatch => "predecessor_hash_mismatch",
            LinkFault::FutureTimestamp => "future_timestamp",
            LinkFault::TimestampRegression => "timestamp_regression",
        }
    }
}

impl std::fmt::Display for LinkFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of verifying the chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainVerification {
    /// Whether the chain is valid
    pub is_valid: bool,

    /// Number of blocks in the chain
    pub block_count: usize,

    /// Position of the first block found at fault
    pub first_invalid_index: Option<usize>,

    /// What went wrong
    pub fault: Option<LinkFault>,

    /// Human-readable error message
    pub message: Option<String>,

    /// Hash of the tip, when the chain is valid
    pub last_valid_hash: Option<String>,
}

impl ChainVerification {
    /// Create a valid verification result
    pub fn valid(block_count: usize, last_hash: String) -> Self {
        Self {
            is_valid: true,
            block_count,
            first_invalid_index: None,
            fault: None,
            message: None,
            last_valid_hash: Some(last_hash),
        }
    }

    /// Create an invalid verification result
    pub fn invalid(block_count: usize, index: usize, fault: LinkFault, message: String) -> Self {
        Self {
            is_valid: false,
            block_count,
            first_invalid_index: Some(index),
            fault: Some(fault),
            message: Some(message),
            last_valid_hash: None,
        }
    }
}

/// Single-writer, in-memory hash chain
///
/// Seeded with a genesis block on construction; grows only through
/// [`add_block`](Self::add_block) / [`append`](Self::append).
/// Mutation takes `&mut self`, so sharing across threads requires one
/// coarse lock around the whole service.
#[derive(Debug)]
pub struct ChainService<C: Clock> {
    /// Time source for stamping and validation
    clock: C,

    /// Service configuration
    config: ChainConfig,

    /// Block arena; position == block index for well-formed chains
    blocks: Vec<Block>,
}

impl<C: Clock> ChainService<C> {
    /// Create a chain seeded with the genesis block
    pub fn new(clock: C) -> Self {
        Self::with_config(clock, ChainConfig::default())
    }

    /// Create a chain with an explicit configuration
    pub fn with_config(clock: C, config: ChainConfig) -> Self {
        let genesis = Block::at(0, GENESIS_PAYLOAD, None, clock.utc_time());
        tracing::debug!(
            "Seeded genesis block {} (clock: {})",
            genesis.hash(),
            clock.name()
        );

        Self {
            clock,
            config,
            blocks: vec![genesis],
        }
    }

    /// Append a block carrying `payload`
    ///
    /// Returns false, leaving the chain untouched, if the payload is empty
    /// or whitespace-only.
    pub fn add_block(&mut self, payload: &str) -> bool {
        self.append(payload).is_ok()
    }

    /// Append a block carrying `payload` and return it
    pub fn append(&mut self, payload: &str) -> Result<&Block> {
        if payload.trim().is_empty() {
            tracing::warn!("Rejected block with empty payload at index {}", self.blocks.len());
            return Err(ChainError::EmptyPayload);
        }

        let index = self.blocks.len() as u64;
        let block = Block::at(index, payload, Some(self.tip()), self.clock.utc_time());
        tracing::debug!("Appended block {} ({})", index, block.hash());

        self.blocks.push(block);
        Ok(self.tip())
    }

    /// True if every block is intact and every adjacent pair is linked
    pub fn validate_chain(&self) -> bool {
        self.first_fault().is_none()
    }

    /// Verify the chain and report where it first fails
    pub fn verify(&self) -> ChainVerification {
        match self.first_fault() {
            None => ChainVerification::valid(self.blocks.len(), self.tip().hash().to_string()),
            Some((index, fault)) => {
                let message = self.describe(index, fault);
                tracing::warn!("Chain verification failed: {}", message);
                ChainVerification::invalid(self.blocks.len(), index, fault, message)
            }
        }
    }

    /// Verify the chain, turning a failure into an error
    pub fn ensure_valid(&self) -> Result<()> {
        match self.first_fault() {
            None => Ok(()),
            Some((index, fault)) => Err(ChainError::ChainIntegrity { index, fault }),
        }
    }

    /// True if `current` correctly follows `previous`
    ///
    /// Fails when either block is absent or `current` has no predecessor.
    /// Timestamps are compared against a fresh reading of the clock.
    pub fn are_linked(&self, previous: Option<&Block>, current: Option<&Block>) -> bool {
        self.link_fault(previous, current).is_none()
    }

    /// First linkage condition that `(previous, current)` violates, if any
    ///
    /// Block integrity is not checked here; see [`Block::is_tampered`].
    pub fn link_fault(&self, previous: Option<&Block>, current: Option<&Block>) -> Option<LinkFault> {
        let (previous, current) = match (previous, current) {
            (Some(previous), Some(current)) => (previous, current),
            _ => return Some(LinkFault::MissingBlock),
        };

        if current.predecessor().is_none() {
            return Some(LinkFault::MissingPredecessor);
        }

        if previous.index().checked_add(1) != Some(current.index()) {
            return Some(LinkFault::IndexGap);
        }

        if previous.hash() != current.predecessor_hash() {
            return Some(LinkFault::PredecessorHashMismatch);
        }

        let now = self.clock.utc_time();
        if previous.created_at() > now || current.created_at() > now {
            return Some(LinkFault::FutureTimestamp);
        }

        if self.config.strict_timestamps && current.created_at() < previous.created_at() {
            return Some(LinkFault::TimestampRegression);
        }

        None
    }

    /// All blocks in order, genesis first
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks, genesis included
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false: the genesis block is never removed
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The genesis block
    pub fn genesis(&self) -> &Block {
        &self.blocks[0]
    }

    /// The most recently appended block
    pub fn tip(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Block at the given position
    pub fn get(&self, index: u64) -> Option<&Block> {
        usize::try_from(index).ok().and_then(|i| self.blocks.get(i))
    }

    /// Resolve a block's predecessor reference
    pub fn predecessor_of(&self, block: &Block) -> Option<&Block> {
        block.predecessor().and_then(|index| self.get(index))
    }

    /// The clock this chain stamps and validates with
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Active configuration
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    fn first_fault(&self) -> Option<(usize, LinkFault)> {
        if self.blocks.len() <= 1 {
            return None;
        }

        for (i, pair) in self.blocks.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);

            if current.is_tampered() {
                return Some((i + 1, LinkFault::Tampered));
            }

            if previous.is_tampered() {
                return Some((i, LinkFault::Tampered));
            }

            if let Some(fault) = self.link_fault(Some(previous), Some(current)) {
                return Some((i + 1, fault));
            }
        }

        None
    }

    fn describe(&self, index: usize, fault: LinkFault) -> String {
        let block = &self.blocks[index];
        match fault {
            LinkFault::Tampered => format!(
                "Block {} hash mismatch: stored {}, computed {}",
                index,
                block.hash(),
                block.compute_hash()
            ),
            LinkFault::IndexGap => format!(
                "Block {} has index {}, expected {}",
                index,
                block.index(),
                self.blocks[index - 1].index().saturating_add(1)
            ),
            LinkFault::PredecessorHashMismatch => format!(
                "Block {} predecessor hash {} doesn't match previous block hash {}",
                index,
                block.predecessor_hash(),
                self.blocks[index - 1].hash()
            ),
            LinkFault::FutureTimestamp => format!(
                "Block {} or its predecessor is stamped after {}",
                index,
                self.clock.utc_time()
            ),
            other => format!("Block {}: {}", index, other),
        }
    }
}

/// Test-only access to the arena for tamper simulation
#[cfg(test)]
impl<C: Clock> ChainService<C> {
    pub(crate) fn replace_block(&mut self, index: usize, block: Block) {
        self.blocks[index] = block;
    }

    pub(crate) fn push_unchecked(&mut self, block: Block) {
        self.blocks.push(block);
    }
}
