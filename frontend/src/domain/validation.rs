//! Field-level validation rules for the hero form.
//!
//! Rules are evaluated independently per field. A field reports every
//! violation it has; the displayed message is the highest-priority one.

use std::fmt;

use chrono::NaiveDate;

use super::hero::parse_form_date;

/// Editable hero form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeroField {
    /// Full civil name.
    Name,
    /// Alias.
    HeroName,
    /// Date of birth.
    BirthDate,
    /// Height in metres.
    Height,
    /// Weight in kilograms.
    Weight,
}

impl HeroField {
    /// Every field, in display order.
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::HeroName,
        Self::BirthDate,
        Self::Height,
        Self::Weight,
    ];

    /// Key used by the backend for this field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::HeroName => "heroName",
            Self::BirthDate => "birthDate",
            Self::Height => "height",
            Self::Weight => "weight",
        }
    }
}

impl fmt::Display for HeroField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed rule for one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldViolation {
    /// Value is missing or blank.
    Required,
    /// Value is shorter than `required` characters.
    MinLength { required: usize },
    /// Value is longer than `required` characters.
    MaxLength { required: usize },
    /// Date is later than today.
    FutureDate,
    /// Number is above `max`.
    MaxValue { max: f64 },
    /// Number is below `min`.
    MinValue { min: f64 },
    /// Value is not a calendar date.
    InvalidDate,
    /// Value is not a finite number.
    NotANumber,
}

impl FieldViolation {
    /// Display priority; lower wins.
    const fn priority(self) -> u8 {
        match self {
            Self::Required => 0,
            Self::MinLength { .. } => 1,
            Self::MaxLength { .. } => 2,
            Self::FutureDate => 3,
            Self::MaxValue { .. } => 4,
            Self::MinValue { .. } | Self::InvalidDate | Self::NotANumber => 5,
        }
    }

    /// User-facing message for this violation.
    pub fn message(self) -> String {
        match self {
            Self::Required => "This field is required".to_owned(),
            Self::MinLength { required } => format!("Minimum length: {required} characters"),
            Self::MaxLength { required } => format!("Maximum length: {required} characters"),
            Self::FutureDate => "Date cannot be in the future".to_owned(),
            Self::MaxValue { max } => format!("Maximum value: {max}"),
            Self::MinValue { .. } | Self::InvalidDate | Self::NotANumber => {
                "Invalid value".to_owned()
            }
        }
    }
}

/// Pick the message to show for a set of violations, if any.
///
/// # Examples
/// ```
/// use frontend::domain::{FieldViolation, primary_message};
///
/// let message = primary_message(&[
///     FieldViolation::MaxValue { max: 500.0 },
///     FieldViolation::Required,
/// ]);
/// assert_eq!(message.as_deref(), Some("This field is required"));
/// ```
pub fn primary_message(violations: &[FieldViolation]) -> Option<String> {
    violations
        .iter()
        .copied()
        .min_by_key(|violation| violation.priority())
        .map(FieldViolation::message)
}

/// How a field's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Calendar date in `YYYY-MM-DD` form.
    Date {
        /// Reject dates later than today.
        not_in_future: bool,
    },
    /// Finite decimal number.
    Number,
}

/// Rules applied to one field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRules {
    /// Interpretation of the raw text.
    pub kind: FieldKind,
    /// Reject blank values.
    pub required: bool,
    /// Minimum trimmed length in characters.
    pub min_length: Option<usize>,
    /// Maximum trimmed length in characters.
    pub max_length: Option<usize>,
    /// Inclusive lower bound for numbers.
    pub min_value: Option<f64>,
    /// Inclusive upper bound for numbers.
    pub max_value: Option<f64>,
}

impl FieldRules {
    /// Required text with a minimum length.
    pub const fn text(min_length: usize) -> Self {
        Self {
            kind: FieldKind::Text,
            required: true,
            min_length: Some(min_length),
            max_length: None,
            min_value: None,
            max_value: None,
        }
    }

    /// Required date that may not lie in the future.
    pub const fn past_date() -> Self {
        Self {
            kind: FieldKind::Date {
                not_in_future: true,
            },
            required: true,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
        }
    }

    /// Required number within an inclusive range.
    pub const fn number(min: f64, max: f64) -> Self {
        Self {
            kind: FieldKind::Number,
            required: true,
            min_length: None,
            max_length: None,
            min_value: Some(min),
            max_value: Some(max),
        }
    }

    /// Set a maximum length.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Evaluate the rules against raw input.
    ///
    /// A blank value reports only `Required` (or nothing when optional);
    /// other rules are evaluated on the trimmed value.
    pub fn check(&self, raw: &str, today: NaiveDate) -> Vec<FieldViolation> {
        let value = raw.trim();
        if value.is_empty() {
            return if self.required {
                vec![FieldViolation::Required]
            } else {
                Vec::new()
            };
        }

        let mut violations = Vec::new();
        let length = value.chars().count();
        if let Some(required) = self.min_length.filter(|min| length < *min) {
            violations.push(FieldViolation::MinLength { required });
        }
        if let Some(required) = self.max_length.filter(|max| length > *max) {
            violations.push(FieldViolation::MaxLength { required });
        }

        match self.kind {
            FieldKind::Text => {}
            FieldKind::Date { not_in_future } => match parse_form_date(value) {
                Some(date) if not_in_future && date > today => {
                    violations.push(FieldViolation::FutureDate);
                }
                Some(_) => {}
                None => violations.push(FieldViolation::InvalidDate),
            },
            FieldKind::Number => match parse_number(value) {
                Some(number) => {
                    if let Some(min) = self.min_value.filter(|min| number < *min) {
                        violations.push(FieldViolation::MinValue { min });
                    }
                    if let Some(max) = self.max_value.filter(|max| number > *max) {
                        violations.push(FieldViolation::MaxValue { max });
                    }
                }
                None => violations.push(FieldViolation::NotANumber),
            },
        }
        violations
    }
}

/// Parse a finite decimal number.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Rule table for the whole hero form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormRules {
    /// Rules for [`HeroField::Name`].
    pub name: FieldRules,
    /// Rules for [`HeroField::HeroName`].
    pub hero_name: FieldRules,
    /// Rules for [`HeroField::BirthDate`].
    pub birth_date: FieldRules,
    /// Rules for [`HeroField::Height`].
    pub height: FieldRules,
    /// Rules for [`HeroField::Weight`].
    pub weight: FieldRules,
}

/// Minimum length of names and aliases.
pub const NAME_MIN_LENGTH: usize = 2;
/// Inclusive height bounds in metres.
pub const HEIGHT_RANGE: (f64, f64) = (0.5, 3.0);
/// Inclusive weight bounds in kilograms.
pub const WEIGHT_RANGE: (f64, f64) = (0.0, 500.0);

impl Default for FormRules {
    fn default() -> Self {
        Self {
            name: FieldRules::text(NAME_MIN_LENGTH),
            hero_name: FieldRules::text(NAME_MIN_LENGTH),
            birth_date: FieldRules::past_date(),
            height: FieldRules::number(HEIGHT_RANGE.0, HEIGHT_RANGE.1),
            weight: FieldRules::number(WEIGHT_RANGE.0, WEIGHT_RANGE.1),
        }
    }
}

impl FormRules {
    /// Rules for one field.
    pub const fn for_field(&self, field: HeroField) -> &FieldRules {
        match field {
            HeroField::Name => &self.name,
            HeroField::HeroName => &self.hero_name,
            HeroField::BirthDate => &self.birth_date,
            HeroField::Height => &self.height,
            HeroField::Weight => &self.weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
    }

    fn check(field: HeroField, raw: &str, today: NaiveDate) -> Vec<FieldViolation> {
        FormRules::default().for_field(field).check(raw, today)
    }

    #[rstest]
    #[case("0.5", true)]
    #[case("3.0", true)]
    #[case("1.91", true)]
    #[case("0.49999", false)]
    #[case("3.00001", false)]
    #[case("tall", false)]
    #[case("NaN", false)]
    #[case("", false)]
    fn height_bounds_are_inclusive(today: NaiveDate, #[case] raw: &str, #[case] ok: bool) {
        assert_eq!(check(HeroField::Height, raw, today).is_empty(), ok, "{raw}");
    }

    #[rstest]
    #[case("0", true)]
    #[case("500", true)]
    #[case("-0.1", false)]
    #[case("500.01", false)]
    fn weight_bounds_are_inclusive(today: NaiveDate, #[case] raw: &str, #[case] ok: bool) {
        assert_eq!(check(HeroField::Weight, raw, today).is_empty(), ok, "{raw}");
    }

    #[rstest]
    fn birth_date_today_is_accepted(today: NaiveDate) {
        assert!(check(HeroField::BirthDate, "2024-06-15", today).is_empty());
    }

    #[rstest]
    fn birth_date_tomorrow_is_rejected(today: NaiveDate) {
        assert_eq!(
            check(HeroField::BirthDate, "2024-06-16", today),
            vec![FieldViolation::FutureDate]
        );
    }

    #[rstest]
    #[case::words("yesterday")]
    #[case::garbage_time("1990-05-05Tgarbage")]
    #[case::empty_time("1990-05-05T")]
    #[case::impossible_day("1990-02-30")]
    fn unparseable_birth_date_is_invalid(today: NaiveDate, #[case] raw: &str) {
        let violations = check(HeroField::BirthDate, raw, today);
        assert_eq!(violations, vec![FieldViolation::InvalidDate]);
        assert_eq!(primary_message(&violations).as_deref(), Some("Invalid value"));
    }

    #[rstest]
    fn blank_name_reports_required_only(today: NaiveDate) {
        assert_eq!(
            check(HeroField::Name, "   ", today),
            vec![FieldViolation::Required]
        );
    }

    #[rstest]
    fn single_character_name_reports_min_length(today: NaiveDate) {
        let violations = check(HeroField::Name, "A", today);
        assert_eq!(violations, vec![FieldViolation::MinLength { required: 2 }]);
        assert_eq!(
            primary_message(&violations).as_deref(),
            Some("Minimum length: 2 characters")
        );
    }

    #[rstest]
    fn max_value_message_names_the_bound(today: NaiveDate) {
        let violations = check(HeroField::Weight, "600", today);
        assert_eq!(
            primary_message(&violations).as_deref(),
            Some("Maximum value: 500")
        );
    }

    #[rstest]
    fn below_minimum_uses_generic_message(today: NaiveDate) {
        let violations = check(HeroField::Height, "0.2", today);
        assert_eq!(primary_message(&violations).as_deref(), Some("Invalid value"));
    }

    #[rstest]
    fn min_length_outranks_max_length_and_max_length_is_opt_in(today: NaiveDate) {
        let rules = FieldRules::text(2).with_max_length(4);
        assert_eq!(
            rules.check("Kal-El", today),
            vec![FieldViolation::MaxLength { required: 4 }]
        );
        assert!(FieldRules::text(2).check("Kal-El of Krypton", today).is_empty());
        assert_eq!(
            primary_message(&[
                FieldViolation::MaxLength { required: 4 },
                FieldViolation::MinLength { required: 2 },
            ])
            .as_deref(),
            Some("Minimum length: 2 characters")
        );
    }

    #[rstest]
    fn future_date_outranks_generic_violations() {
        let message = primary_message(&[FieldViolation::InvalidDate, FieldViolation::FutureDate]);
        assert_eq!(message.as_deref(), Some("Date cannot be in the future"));
    }

    #[rstest]
    fn field_keys_match_backend_names() {
        let keys: Vec<_> = HeroField::ALL.iter().map(|field| field.as_str()).collect();
        assert_eq!(keys, ["name", "heroName", "birthDate", "height", "weight"]);
    }
}
