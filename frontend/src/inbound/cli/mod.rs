//! The `heroes` command line.
//!
//! Each invocation opens the hero page, performs one action through the
//! page controller, and prints what a user of the page would see: the list,
//! the form, per-field validation messages, and notices.

mod args;
mod confirmation;
mod render;
mod runner;

pub use args::{Cli, Command, FieldArgs};
pub use confirmation::ConsoleConfirmation;
pub use runner::{CliError, run};
