//! Read-only projection of the hero list for display.

use chrono::NaiveDate;

use super::hero::{Hero, HeroId, Superpower, SuperpowerId};

/// Label used when a superpower identifier is missing from the catalogue.
pub const UNKNOWN_SUPERPOWER: &str = "Unknown";

/// Resolve a superpower name from the catalogue.
pub fn superpower_name(catalogue: &[Superpower], id: SuperpowerId) -> &str {
    catalogue
        .iter()
        .find(|power| power.id == id)
        .map_or(UNKNOWN_SUPERPOWER, |power| power.name.as_str())
}

/// One displayable row of the hero list.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroRow {
    /// Hero identifier, when persisted.
    pub id: Option<HeroId>,
    /// Full name.
    pub name: String,
    /// Alias.
    pub hero_name: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
    /// Height in metres.
    pub height: f64,
    /// Weight in kilograms.
    pub weight: f64,
    /// Superpower names in the hero's identifier order.
    pub superpowers: Vec<String>,
}

impl HeroRow {
    /// Project `hero` using `catalogue` for name lookups.
    pub fn project(hero: &Hero, catalogue: &[Superpower]) -> Self {
        Self {
            id: hero.id,
            name: hero.name.clone(),
            hero_name: hero.hero_name.clone(),
            birth_date: hero.birth_date,
            height: hero.height,
            weight: hero.weight,
            superpowers: hero
                .superpower_ids
                .iter()
                .map(|id| superpower_name(catalogue, *id).to_owned())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unknown_identifiers_use_the_fallback_label() {
        let catalogue = vec![Superpower::new(SuperpowerId::new(1), "Flight")];
        let hero = Hero {
            id: Some(HeroId::new(3)),
            name: "Barry Allen".to_owned(),
            hero_name: "Flash".to_owned(),
            birth_date: NaiveDate::from_ymd_opt(1956, 3, 19).expect("valid date"),
            height: 1.8,
            weight: 81.0,
            superpower_ids: vec![SuperpowerId::new(1), SuperpowerId::new(42)],
            superpowers: None,
        };

        let row = HeroRow::project(&hero, &catalogue);
        assert_eq!(row.superpowers, ["Flight", UNKNOWN_SUPERPOWER]);
        assert_eq!(row.hero_name, "Flash");
    }
}
