//! Wire DTOs for the hero API.
//!
//! Responses decode into these transport types first, then map into domain
//! records in one pass. Payloads serialise from borrowed domain values.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::ports::ValidationMessages;
use crate::domain::{
    Hero, HeroId, HeroPayload, Superpower, SuperpowerId, format_birth_date, parse_birth_date,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HeroDto {
    #[serde(default)]
    pub(super) id: Option<i64>,
    pub(super) name: String,
    pub(super) hero_name: String,
    pub(super) birth_date: String,
    pub(super) height: f64,
    pub(super) weight: f64,
    #[serde(default)]
    pub(super) superpower_ids: Vec<i64>,
    #[serde(default)]
    pub(super) superpowers: Option<Vec<SuperpowerDto>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SuperpowerDto {
    pub(super) id: i64,
    pub(super) name: String,
}

impl HeroDto {
    pub(super) fn into_domain(self) -> Result<Hero, String> {
        let birth_date = parse_birth_date(&self.birth_date).ok_or_else(|| {
            format!(
                "hero {} has an unreadable birthDate {:?}",
                self.id.map_or_else(|| "<new>".to_owned(), |id| id.to_string()),
                self.birth_date
            )
        })?;

        Ok(Hero {
            id: self.id.map(HeroId::new),
            name: self.name,
            hero_name: self.hero_name,
            birth_date,
            height: self.height,
            weight: self.weight,
            superpower_ids: self
                .superpower_ids
                .into_iter()
                .map(SuperpowerId::new)
                .collect(),
            superpowers: self.superpowers.map(|powers| {
                powers
                    .into_iter()
                    .map(SuperpowerDto::into_domain)
                    .collect()
            }),
        })
    }
}

impl SuperpowerDto {
    pub(super) fn into_domain(self) -> Superpower {
        Superpower::new(SuperpowerId::new(self.id), self.name)
    }
}

/// Outgoing hero body. Carries identifiers only, never expanded superpowers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HeroPayloadDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    name: &'a str,
    hero_name: &'a str,
    birth_date: String,
    height: f64,
    weight: f64,
    superpower_ids: Vec<i64>,
}

impl<'a> From<&'a HeroPayload> for HeroPayloadDto<'a> {
    fn from(payload: &'a HeroPayload) -> Self {
        Self {
            id: payload.id.map(HeroId::get),
            name: &payload.name,
            hero_name: &payload.hero_name,
            birth_date: format_birth_date(payload.birth_date),
            height: payload.height,
            weight: payload.weight,
            superpower_ids: payload
                .superpower_ids
                .iter()
                .map(|id| SuperpowerId::get(*id))
                .collect(),
        }
    }
}

/// Read field-keyed validation messages from an error body.
///
/// The map is looked up under `envelope_key` first, where each field may
/// carry one message or a list. Failing that, the whole body is read as the
/// map, in which case every value must be a list of strings. Field order is
/// kept as sent.
pub(super) fn parse_validation_errors(body: &[u8], envelope_key: &str) -> Option<ValidationMessages> {
    let Ok(Value::Object(root)) = serde_json::from_slice::<Value>(body) else {
        return None;
    };

    if let Some(Value::Object(fields)) = root.get(envelope_key) {
        return field_messages(fields, MessageShape::OneOrMany);
    }
    field_messages(&root, MessageShape::ListOnly)
}

#[derive(Debug, Clone, Copy)]
enum MessageShape {
    OneOrMany,
    ListOnly,
}

fn field_messages(fields: &Map<String, Value>, shape: MessageShape) -> Option<ValidationMessages> {
    let pairs = fields
        .iter()
        .map(|(field, value)| Some((field.clone(), messages(value, shape)?)))
        .collect::<Option<Vec<_>>>()?;
    let errors = ValidationMessages::new(pairs);
    (!errors.is_empty()).then_some(errors)
}

fn messages(value: &Value, shape: MessageShape) -> Option<Vec<String>> {
    match (value, shape) {
        (Value::String(message), MessageShape::OneOrMany) => Some(vec![message.clone()]),
        (Value::Array(items), _) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect(),
        _ => None,
    }
}
