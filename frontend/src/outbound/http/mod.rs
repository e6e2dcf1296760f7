//! HTTP adapter for the hero API.
//!
//! A thin reqwest implementation of the `HeroGateway` port.

mod dto;
mod http_gateway;

pub use http_gateway::{DEFAULT_BASE_URL, DEFAULT_VALIDATION_ERRORS_KEY, HttpHeroGateway};
