//! Drives the hero page from one parsed command.

use std::io::{self, Write};

use tracing::info;

use super::args::{Cli, Command, FieldArgs};
use super::render::{write_field_errors, write_form, write_notice, write_rows, write_superpowers};
use crate::domain::ports::{DeleteConfirmation, HeroGateway};
use crate::domain::{
    DeleteOutcome, HeroId, HeroPage, HeroPageError, SubmitOutcome, SuperpowerId,
};
use crate::inbound::routes::{RouteMatch, resolve_route};

/// Failures that end a CLI run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// A page operation failed; its notice or field errors were printed.
    #[error(transparent)]
    Page(#[from] HeroPageError),
}

/// Execute `cli` against `page`, writing everything the user sees to `out`.
///
/// The session (catalogue and list) is loaded first, as opening the page
/// would. A load failure is printed and only fails the read-only commands.
///
/// # Errors
///
/// Returns [`CliError`] when output fails or the requested action fails.
pub async fn run<G, C, W>(
    cli: &Cli,
    page: &mut HeroPage<G, C>,
    out: &mut W,
) -> Result<(), CliError>
where
    G: HeroGateway,
    C: DeleteConfirmation,
    W: Write,
{
    if let RouteMatch::Redirect(route) = resolve_route(&cli.path) {
        info!(requested = %cli.path, to = route.path(), "redirecting to the hero page");
    }

    let loaded = page.load_session().await;
    if let Err(error) = &loaded {
        report(out, page, error)?;
        page.take_notice();
    }

    match &cli.command {
        Command::List => {
            loaded?;
            write_rows(out, &page.hero_rows())?;
        }
        Command::Superpowers => {
            loaded?;
            write_superpowers(out, page.superpowers())?;
        }
        Command::Show { id } => {
            open_existing(out, page, HeroId::new(*id)).await?;
            write_form(out, page)?;
            page.cancel();
        }
        Command::Create {
            fields,
            superpowers,
        } => {
            page.open_create()?;
            apply_fields(page, fields)?;
            for id in superpowers.iter().copied().map(SuperpowerId::new) {
                if !page.is_superpower_selected(id) {
                    page.toggle_superpower(id)?;
                }
            }
            submit(out, page).await?;
        }
        Command::Edit {
            id,
            fields,
            toggle_superpowers,
        } => {
            open_existing(out, page, HeroId::new(*id)).await?;
            apply_fields(page, fields)?;
            for id in toggle_superpowers.iter().copied().map(SuperpowerId::new) {
                page.toggle_superpower(id)?;
            }
            submit(out, page).await?;
        }
        Command::Delete { id, .. } => delete(out, page, HeroId::new(*id)).await?,
    }
    Ok(())
}

async fn open_existing<G, C, W>(
    out: &mut W,
    page: &mut HeroPage<G, C>,
    id: HeroId,
) -> Result<(), CliError>
where
    G: HeroGateway,
    C: DeleteConfirmation,
    W: Write,
{
    if let Err(error) = page.open_edit_by_id(id).await {
        report(out, page, &error)?;
        return Err(error.into());
    }
    Ok(())
}

fn apply_fields<G, C>(page: &mut HeroPage<G, C>, fields: &FieldArgs) -> Result<(), HeroPageError> {
    for (field, value) in fields.supplied() {
        page.set_field(field, value)?;
    }
    Ok(())
}

async fn submit<G, C, W>(out: &mut W, page: &mut HeroPage<G, C>) -> Result<(), CliError>
where
    G: HeroGateway,
    C: DeleteConfirmation,
    W: Write,
{
    match page.submit().await {
        Ok(outcome) => {
            let (verb, hero) = match &outcome {
                SubmitOutcome::Created(hero) => ("Created", hero),
                SubmitOutcome::Updated(hero) => ("Updated", hero),
            };
            let id = hero.id.map_or_else(|| "-".to_owned(), |id| id.to_string());
            writeln!(out, "{verb} hero {id} ({}).", hero.hero_name)?;
            if let Some(notice) = page.take_notice() {
                write_notice(out, &notice)?;
            }
            Ok(())
        }
        Err(error) => {
            report(out, page, &error)?;
            Err(error.into())
        }
    }
}

async fn delete<G, C, W>(out: &mut W, page: &mut HeroPage<G, C>, id: HeroId) -> Result<(), CliError>
where
    G: HeroGateway,
    C: DeleteConfirmation,
    W: Write,
{
    match page.delete(id).await {
        Ok(DeleteOutcome::Declined) => {
            writeln!(out, "Deletion cancelled.")?;
            Ok(())
        }
        Ok(DeleteOutcome::Deleted { .. }) => {
            writeln!(out, "Deleted hero {id}.")?;
            if let Some(notice) = page.take_notice() {
                write_notice(out, &notice)?;
            }
            Ok(())
        }
        Err(error) => {
            report(out, page, &error)?;
            Err(error.into())
        }
    }
}

fn report<G, C>(
    out: &mut impl Write,
    page: &HeroPage<G, C>,
    error: &HeroPageError,
) -> io::Result<()> {
    match error {
        HeroPageError::InvalidForm { .. } => {
            writeln!(out, "Please correct the following fields:")?;
            write_field_errors(out, page)
        }
        HeroPageError::Gateway { notice, .. } => write_notice(out, notice),
        other => writeln!(out, "{other}"),
    }
}
