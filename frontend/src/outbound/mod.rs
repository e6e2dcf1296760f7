//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.
//!
//! - **http**: reqwest-backed hero API gateway

pub mod http;
