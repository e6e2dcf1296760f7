//! Test utilities for the frontend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Only compiled for tests or with the `test-support` feature.

mod clock;
mod confirmation;
mod in_memory_gateway;

pub use clock::FixedClock;
pub use confirmation::ScriptedConfirmation;
pub use in_memory_gateway::{GatewayCall, GatewayOperation, InMemoryHeroGateway};
