//! # Chain Core
//!
//! A minimal append-only hash chain: every block is bound to its predecessor
//! by hash, and the chain can be checked for tampering and broken links.
//!
//! - **Block**: immutable record whose SHA-256 hash covers its index,
//!   creation time, payload, and its predecessor's hash
//! - **ChainService**: owns the sequence, appends new blocks at the tip, and
//!   validates the whole chain
//! - **Clock**: injected time source used for stamping and validation
//!
//! There is no networking, consensus, or persistence. The chain lives in
//! memory for as long as its service does.
//!
//! ## Example
//!
//! ```rust
//! use chain_core::{ChainService, SystemClock};
//!
//! let mut chain = ChainService::new(SystemClock::new());
//!
//! assert!(chain.add_block("Alice pays Bob 5"));
//! assert!(!chain.add_block("   "));
//!
//! assert_eq!(chain.len(), 2);
//! assert_eq!(chain.blocks()[1].predecessor_hash(), chain.genesis().hash());
//! assert!(chain.validate_chain());
//! ```

pub mod block;
pub mod chain;
pub mod clock;
pub mod config;
pub mod error;

// Re-export main types
pub use block::Block;
pub use chain::{ChainService, ChainVerification, LinkFault};
pub use clock::{Clock, MockClock, SystemClock};
pub use config::ChainConfig;
pub use error::{ChainError, ErrorCategory, Result};

/// Payload of the block every chain starts with
pub const GENESIS_PAYLOAD: &str = "Genesis Block";

/// Stand-in for the predecessor hash of the genesis block
pub const GENESIS_PREDECESSOR_HASH: &str = "0";

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};
    use std::thread;

    #[test]
    fn test_full_workflow() {
        let mut chain = ChainService::new(SystemClock::new());

        assert_eq!(chain.genesis().payload(), GENESIS_PAYLOAD);
        assert_eq!(chain.genesis().predecessor_hash(), GENESIS_PREDECESSOR_HASH);

        for payload in ["Alice pays Bob 5", "Bob pays Charlie 2", "Charlie pays Dave 1"] {
            assert!(chain.add_block(payload));
        }

        assert_eq!(chain.len(), 4);
        assert!(chain.validate_chain());
        assert!(chain.verify().is_valid);
    }

    #[test]
    fn test_shared_behind_a_single_lock() {
        let chain = Arc::new(RwLock::new(ChainService::new(SystemClock::new())));

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let chain = Arc::clone(&chain);
                thread::spawn(move || {
                    for i in 0..10 {
                        let mut chain = chain.write().unwrap();
                        assert!(chain.add_block(&format!("writer {} entry {}", t, i)));
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }

        let chain = chain.read().unwrap();
        assert_eq!(chain.len(), 41);
        assert!(chain.validate_chain());
    }
}
