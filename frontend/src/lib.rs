//! Hero catalogue client library.
//!
//! `domain` holds the page controller and its rules, `outbound` talks to the
//! hero API, and `inbound` drives the page from the command line.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
