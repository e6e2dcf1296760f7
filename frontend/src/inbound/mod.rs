//! Inbound adapters that drive the domain.
//!
//! - **cli**: the `heroes` command line, standing in for the page view
//! - **routes**: navigation route table

pub mod cli;
pub mod routes;
