//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod delete_confirmation;
mod hero_gateway;

#[cfg(test)]
pub use delete_confirmation::MockDeleteConfirmation;
pub use delete_confirmation::{DeleteConfirmation, PreConfirmed};
#[cfg(test)]
pub use hero_gateway::MockHeroGateway;
pub use hero_gateway::{FixtureHeroGateway, HeroGateway, HeroGatewayError, ValidationMessages};
