//! Plain-text rendering of page state.

use std::io::{self, Write};

use crate::domain::{
    EditorPhase, HeroField, HeroForm, HeroPage, HeroRow, Notice, Superpower, SuperpowerId,
    format_birth_date,
};

pub(super) fn write_rows(out: &mut impl Write, rows: &[HeroRow]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No heroes found.");
    }
    writeln!(
        out,
        "{:>5}  {:<24} {:<20} {:<10} {:>6} {:>7}  SUPERPOWERS",
        "ID", "NAME", "HERO NAME", "BORN", "HEIGHT", "WEIGHT"
    )?;
    for row in rows {
        let id = row.id.map_or_else(|| "-".to_owned(), |id| id.to_string());
        writeln!(
            out,
            "{id:>5}  {:<24} {:<20} {:<10} {:>6} {:>7}  {}",
            row.name,
            row.hero_name,
            format_birth_date(row.birth_date),
            row.height,
            row.weight,
            row.superpowers.join(", ")
        )?;
    }
    Ok(())
}

pub(super) fn write_superpowers(out: &mut impl Write, catalogue: &[Superpower]) -> io::Result<()> {
    for power in catalogue {
        writeln!(out, "{:>5}  {}", power.id, power.name)?;
    }
    Ok(())
}

pub(super) fn write_form<G, C>(out: &mut impl Write, page: &HeroPage<G, C>) -> io::Result<()> {
    let form: &HeroForm = page.form();
    let title = match page.phase() {
        EditorPhase::Editing { hero_id } => format!("Edit hero {hero_id}"),
        _ => "New hero".to_owned(),
    };
    writeln!(out, "{title}")?;
    for field in HeroField::ALL {
        writeln!(out, "  {:<10} {}", field.as_str(), form.value(field))?;
    }
    let names: Vec<String> = page
        .selected_superpowers()
        .into_iter()
        .map(|id: SuperpowerId| page.superpower_name(id).to_owned())
        .collect();
    writeln!(out, "  {:<10} {}", "powers", names.join(", "))
}

/// Write the visible error of every field that has one.
pub(super) fn write_field_errors<G, C>(
    out: &mut impl Write,
    page: &HeroPage<G, C>,
) -> io::Result<()> {
    for field in HeroField::ALL {
        if let Some(message) = page.visible_error(field) {
            writeln!(out, "  {field}: {message}")?;
        }
    }
    Ok(())
}

pub(super) fn write_notice(out: &mut impl Write, notice: &Notice) -> io::Result<()> {
    write!(out, "{notice}")?;
    if !notice.text().ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}
