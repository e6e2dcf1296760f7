//! Editable hero draft backing the create/edit modal.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::hero::{Hero, HeroId, HeroPayload, format_birth_date, parse_form_date};
use super::superpower_selection::{SuperpowerPicker, SuperpowerSelection};
use super::validation::{FieldViolation, FormRules, HeroField, parse_number, primary_message};

/// Violations per field, for fields that fail at least one rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidation {
    errors: BTreeMap<HeroField, Vec<FieldViolation>>,
}

impl FormValidation {
    /// Whether every field passed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations recorded for `field`.
    pub fn violations(&self, field: HeroField) -> &[FieldViolation] {
        self.errors
            .get(&field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Fields that failed, in display order.
    pub fn invalid_fields(&self) -> Vec<HeroField> {
        self.errors.keys().copied().collect()
    }
}

/// Raw field values plus interaction flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeroForm {
    values: BTreeMap<HeroField, String>,
    touched: BTreeSet<HeroField>,
    submitted: bool,
    origin: Option<Hero>,
}

impl HeroForm {
    /// Blank draft for a new hero.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draft populated from a persistent hero.
    ///
    /// Numbers are rendered with `f64`'s shortest round-trip formatting so an
    /// untouched draft parses back to the same values.
    pub fn from_hero(hero: &Hero) -> Self {
        let values = BTreeMap::from([
            (HeroField::Name, hero.name.clone()),
            (HeroField::HeroName, hero.hero_name.clone()),
            (HeroField::BirthDate, format_birth_date(hero.birth_date)),
            (HeroField::Height, hero.height.to_string()),
            (HeroField::Weight, hero.weight.to_string()),
        ]);
        Self {
            values,
            touched: BTreeSet::new(),
            submitted: false,
            origin: Some(hero.clone()),
        }
    }

    /// Raw value of `field`; empty when never set.
    pub fn value(&self, field: HeroField) -> &str {
        self.values.get(&field).map_or("", String::as_str)
    }

    /// Replace the raw value of `field` and mark it touched.
    pub fn set(&mut self, field: HeroField, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.touched.insert(field);
    }

    /// Mark `field` touched without changing it.
    pub fn touch(&mut self, field: HeroField) {
        self.touched.insert(field);
    }

    /// Mark every field touched.
    pub fn touch_all(&mut self) {
        self.touched.extend(HeroField::ALL);
    }

    /// Whether `field` has been touched.
    pub fn is_touched(&self, field: HeroField) -> bool {
        self.touched.contains(&field)
    }

    /// Record a submission attempt. The flag is never cleared on this draft.
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }

    /// Whether a submission was attempted.
    pub const fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// The persistent hero this draft edits, if any.
    pub const fn origin(&self) -> Option<&Hero> {
        self.origin.as_ref()
    }

    /// Identifier of the edited hero, if any.
    pub fn origin_id(&self) -> Option<HeroId> {
        self.origin.as_ref().and_then(|hero| hero.id)
    }

    /// Evaluate every field.
    pub fn validate(&self, rules: &FormRules, today: NaiveDate) -> FormValidation {
        let errors = HeroField::ALL
            .into_iter()
            .filter_map(|field| {
                let violations = rules.for_field(field).check(self.value(field), today);
                (!violations.is_empty()).then_some((field, violations))
            })
            .collect();
        FormValidation { errors }
    }

    /// Whether the error for `field` should be displayed: the field is
    /// touched or the form was submitted, and the field fails validation.
    pub fn should_show_error(&self, field: HeroField, rules: &FormRules, today: NaiveDate) -> bool {
        (self.is_touched(field) || self.submitted)
            && !rules
                .for_field(field)
                .check(self.value(field), today)
                .is_empty()
    }

    /// Highest-priority message for `field`, or `None` when it is valid.
    pub fn error_message(
        &self,
        field: HeroField,
        rules: &FormRules,
        today: NaiveDate,
    ) -> Option<String> {
        primary_message(&rules.for_field(field).check(self.value(field), today))
    }

    /// Build the outgoing payload.
    ///
    /// # Errors
    ///
    /// Returns the failed validation when any field breaks its rules.
    pub fn to_payload(
        &self,
        selection: &SuperpowerSelection,
        rules: &FormRules,
        today: NaiveDate,
    ) -> Result<HeroPayload, FormValidation> {
        let validation = self.validate(rules, today);
        if !validation.is_valid() {
            return Err(validation);
        }

        let birth_date = parse_form_date(self.value(HeroField::BirthDate))
            .ok_or_else(|| FormValidation {
                errors: BTreeMap::from([(HeroField::BirthDate, vec![FieldViolation::InvalidDate])]),
            })?;

        Ok(HeroPayload {
            id: self.origin_id(),
            name: self.value(HeroField::Name).trim().to_owned(),
            hero_name: self.value(HeroField::HeroName).trim().to_owned(),
            birth_date,
            height: parse_number(self.value(HeroField::Height)).unwrap_or(0.0),
            weight: parse_number(self.value(HeroField::Weight)).unwrap_or(0.0),
            superpower_ids: selection.selected(),
        })
    }
}
