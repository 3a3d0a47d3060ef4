//! # Clock capability
//!
//! The chain service never reads ambient time directly. It asks a [`Clock`]
//! handed to it at construction, so tests can pin or move time freely.
//!
//! ```text
//! ┌───────────────────────────────┐
//! │         ChainService          │
//! │  • stamps new blocks          │
//! │  • rejects future timestamps  │
//! └───────────────┬───────────────┘
//!                 │ utc_time()
//!                 ▼
//! ┌───────────────────────────────┐
//! │         Clock (trait)         │
//! ├───────────────┬───────────────┤
//! │ SystemClock   │ MockClock     │
//! │ (wall clock)  │ (testing)     │
//! └───────────────┴───────────────┘
//! ```

pub mod backends;

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};

pub use backends::{MockClock, SystemClock};

/// Source of the current time
///
/// `utc_time` is what the chain uses for stamping and validation.
/// `local_time` exists for display purposes.
pub trait Clock: Send + Sync {
    /// Current time in the local timezone
    fn local_time(&self) -> DateTime<Local>;

    /// Current time in UTC
    fn utc_time(&self) -> DateTime<Utc>;

    /// Backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn local_time(&self) -> DateTime<Local> {
        (**self).local_time()
    }

    fn utc_time(&self) -> DateTime<Utc> {
        (**self).utc_time()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn local_time(&self) -> DateTime<Local> {
        (**self).local_time()
    }

    fn utc_time(&self) -> DateTime<Utc> {
        (**self).utc_time()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn local_time(&self) -> DateTime<Local> {
        (**self).local_time()
    }

    fn utc_time(&self) -> DateTime<Utc> {
        (**self).utc_time()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
