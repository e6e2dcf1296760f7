//! Command-line arguments for the `heroes` binary.

use clap::{Args, Parser, Subcommand};

use crate::domain::HeroField;
use crate::inbound::routes::HERO_ROUTE;

/// `heroes` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "heroes",
    about = "Manage the hero catalogue through its HTTP API",
    version
)]
pub struct Cli {
    /// Page to open; unknown paths fall back to the hero page.
    #[arg(long, value_name = "route", default_value = HERO_ROUTE)]
    pub path: String,
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Page actions.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every hero with its superpowers.
    List,
    /// List the superpower catalogue.
    Superpowers,
    /// Show one hero as the edit form would.
    Show {
        /// Hero identifier.
        id: i64,
    },
    /// Create a hero.
    Create {
        #[command(flatten)]
        fields: FieldArgs,
        /// Superpower identifier to select; repeatable.
        #[arg(long = "superpower", value_name = "id")]
        superpowers: Vec<i64>,
    },
    /// Edit a hero; omitted fields keep their current value.
    Edit {
        /// Hero identifier.
        id: i64,
        #[command(flatten)]
        fields: FieldArgs,
        /// Superpower identifier to select or deselect; repeatable.
        #[arg(long = "toggle-superpower", value_name = "id")]
        toggle_superpowers: Vec<i64>,
    },
    /// Delete a hero after confirmation.
    Delete {
        /// Hero identifier.
        id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

/// Raw form values, passed through to validation unchanged.
#[derive(Debug, Clone, Default, Args)]
pub struct FieldArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,
    /// Alias.
    #[arg(long = "hero-name")]
    pub hero_name: Option<String>,
    /// Birth date as `YYYY-MM-DD`.
    #[arg(long = "birth-date", value_name = "YYYY-MM-DD")]
    pub birth_date: Option<String>,
    /// Height in metres.
    #[arg(long)]
    pub height: Option<String>,
    /// Weight in kilograms.
    #[arg(long)]
    pub weight: Option<String>,
}

impl FieldArgs {
    /// Supplied values in form order.
    pub fn supplied(&self) -> impl Iterator<Item = (HeroField, &str)> {
        [
            (HeroField::Name, &self.name),
            (HeroField::HeroName, &self.hero_name),
            (HeroField::BirthDate, &self.birth_date),
            (HeroField::Height, &self.height),
            (HeroField::Weight, &self.weight),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|value| (field, value)))
    }
}
