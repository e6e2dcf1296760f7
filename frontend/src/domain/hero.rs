//! Hero and superpower data model.
//!
//! These are plain data shapes. The HTTP adapter owns the wire format; the
//! form draft owns validation.

use std::fmt;

use chrono::NaiveDate;

/// Server-assigned hero identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeroId(i64);

impl HeroId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Superpower identifier from the read-only catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuperpowerId(i64);

impl SuperpowerId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Access the raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SuperpowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalogue entry describing one superpower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Superpower {
    /// Stable identifier.
    pub id: SuperpowerId,
    /// Display name.
    pub name: String,
}

impl Superpower {
    /// Build a catalogue entry.
    pub fn new(id: SuperpowerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Hero as returned by the backend.
///
/// ## Invariants
/// - `id` is `None` only for heroes that have not been persisted.
/// - `superpowers`, when present, is the backend's expansion of
///   `superpower_ids` and is never sent back.
#[derive(Debug, Clone, PartialEq)]
pub struct Hero {
    /// Identifier assigned by the backend on creation.
    pub id: Option<HeroId>,
    /// Full civil name.
    pub name: String,
    /// Alias.
    pub hero_name: String,
    /// Date of birth without a time component.
    pub birth_date: NaiveDate,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Identifiers of the hero's superpowers.
    pub superpower_ids: Vec<SuperpowerId>,
    /// Expanded superpower objects supplied for display.
    pub superpowers: Option<Vec<Superpower>>,
}

impl Hero {
    /// Identifiers taken from the expanded superpower list, or empty when the
    /// backend did not expand them.
    pub fn expanded_superpower_ids(&self) -> Vec<SuperpowerId> {
        self.superpowers
            .as_deref()
            .map(|powers| powers.iter().map(|power| power.id).collect())
            .unwrap_or_default()
    }
}

/// Normalised hero body sent on create and update.
///
/// Built only from a validated form. There is no field for
/// expanded superpowers; only identifiers travel to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroPayload {
    /// Present for updates; absent for creates.
    pub id: Option<HeroId>,
    /// Trimmed full name.
    pub name: String,
    /// Trimmed alias.
    pub hero_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Unique, ascending superpower identifiers.
    pub superpower_ids: Vec<SuperpowerId>,
}

/// Wire date format used for birth dates.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a birth date, discarding any time component after `T`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use frontend::domain::parse_birth_date;
///
/// let expected = NaiveDate::from_ymd_opt(1938, 4, 18);
/// assert_eq!(parse_birth_date("1938-04-18T00:00:00"), expected);
/// assert_eq!(parse_birth_date(" 1938-04-18 "), expected);
/// assert_eq!(parse_birth_date("1938-02-30"), None);
/// ```
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split_once('T')
        .map_or(trimmed, |(date, _time)| date);
    NaiveDate::parse_from_str(date_part, BIRTH_DATE_FORMAT).ok()
}

/// Parse a birth date typed into the form. Only a bare `YYYY-MM-DD` is
/// accepted; a time suffix makes the value invalid.
///
/// # Examples
/// ```
/// use frontend::domain::parse_form_date;
///
/// assert!(parse_form_date(" 1938-04-18 ").is_some());
/// assert_eq!(parse_form_date("1938-04-18T00:00:00"), None);
/// ```
pub fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT).ok()
}

/// Render a birth date in wire format.
pub fn format_birth_date(date: NaiveDate) -> String {
    date.format(BIRTH_DATE_FORMAT).to_string()
}
