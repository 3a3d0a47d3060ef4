//! Clock backend implementations
//!
//! - `SystemClock`: reads the wall clock
//! - `MockClock`: fixed, settable instant for tests
//!
//! ## Choosing a Backend
//!
//! - **Tests**: Use `MockClock`
//! - **Everything else**: Use `SystemClock`

mod mock;
mod system;

pub use mock::MockClock;
pub use system::SystemClock;
