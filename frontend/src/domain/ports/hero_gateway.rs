//! Driven port for the remote hero API.
//!
//! One method per domain action, one network round trip per call. The port
//! does not interpret failures; callers decide how to surface them.

use std::fmt;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Hero, HeroId, HeroPayload, Superpower};

/// Field-keyed validation messages returned by the backend.
///
/// Field order and message order are preserved as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationMessages(Vec<(String, Vec<String>)>);

impl ValidationMessages {
    /// Wrap ordered `(field, messages)` pairs.
    pub fn new(fields: Vec<(String, Vec<String>)>) -> Self {
        Self(fields)
    }

    /// Ordered `(field, messages)` pairs.
    pub fn fields(&self) -> &[(String, Vec<String>)] {
        &self.0
    }

    /// Messages for one field.
    pub fn for_field(&self, field: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Every message across every field, in order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .flat_map(|(_, messages)| messages.iter().map(String::as_str))
    }

    /// Whether the backend sent no messages at all.
    pub fn is_empty(&self) -> bool {
        self.messages().next().is_none()
    }
}

impl<F, M> FromIterator<(F, Vec<M>)> for ValidationMessages
where
    F: Into<String>,
    M: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (F, Vec<M>)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, messages)| {
                    (field.into(), messages.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }
}

impl fmt::Display for ValidationMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

define_port_error! {
    /// Errors surfaced by the hero API.
    pub enum HeroGatewayError {
        /// The request never produced a response.
        Transport { message: String } =>
            "hero api transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "hero api timeout: {message}",
        /// The backend rejected the payload with field-keyed messages.
        Validation { errors: ValidationMessages } =>
            "hero api rejected payload: {errors}",
        /// The backend answered with a non-success status.
        Status { status: u16, body: String } =>
            "hero api returned status {status}: {body}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "hero api response decode failed: {message}",
    }
}

impl HeroGatewayError {
    /// Validation messages when the backend rejected the payload.
    pub fn validation_messages(&self) -> Option<&ValidationMessages> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}

/// Port for the hero and superpower endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HeroGateway: Send + Sync {
    /// List every hero.
    async fn list_heroes(&self) -> Result<Vec<Hero>, HeroGatewayError>;

    /// Fetch one hero.
    async fn get_hero(&self, id: HeroId) -> Result<Hero, HeroGatewayError>;

    /// Create a hero; the backend assigns the identifier.
    async fn create_hero(&self, payload: &HeroPayload) -> Result<Hero, HeroGatewayError>;

    /// Replace a hero.
    async fn update_hero(
        &self,
        id: HeroId,
        payload: &HeroPayload,
    ) -> Result<Hero, HeroGatewayError>;

    /// Delete a hero.
    async fn delete_hero(&self, id: HeroId) -> Result<(), HeroGatewayError>;

    /// List the superpower catalogue.
    async fn list_superpowers(&self) -> Result<Vec<Superpower>, HeroGatewayError>;
}

/// Fixture implementation backed by an empty, read-only store.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureHeroGateway;

#[async_trait]
impl HeroGateway for FixtureHeroGateway {
    async fn list_heroes(&self) -> Result<Vec<Hero>, HeroGatewayError> {
        Ok(Vec::new())
    }

    async fn get_hero(&self, id: HeroId) -> Result<Hero, HeroGatewayError> {
        Err(HeroGatewayError::status(404_u16, format!("hero {id} not found")))
    }

    async fn create_hero(&self, _payload: &HeroPayload) -> Result<Hero, HeroGatewayError> {
        Err(HeroGatewayError::status(405_u16, "fixture gateway is read-only"))
    }

    async fn update_hero(
        &self,
        id: HeroId,
        _payload: &HeroPayload,
    ) -> Result<Hero, HeroGatewayError> {
        Err(HeroGatewayError::status(404_u16, format!("hero {id} not found")))
    }

    async fn delete_hero(&self, id: HeroId) -> Result<(), HeroGatewayError> {
        Err(HeroGatewayError::status(404_u16, format!("hero {id} not found")))
    }

    async fn list_superpowers(&self) -> Result<Vec<Superpower>, HeroGatewayError> {
        Ok(Vec::new())
    }
}
