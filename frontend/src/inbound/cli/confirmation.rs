//! Console prompt guarding hero deletion.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::domain::HeroId;
use crate::domain::ports::DeleteConfirmation;

/// Asks on stderr and reads the answer from stdin. `--yes` bypasses it with
/// [`PreConfirmed`](crate::domain::ports::PreConfirmed).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleConfirmation;

impl ConsoleConfirmation {
    fn ask(id: HeroId) -> io::Result<bool> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "Are you sure you want to delete hero {id}? [y/N] ")?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

impl DeleteConfirmation for ConsoleConfirmation {
    fn confirm_delete(&self, id: HeroId) -> bool {
        match Self::ask(id) {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%id, error = %error, "confirmation prompt failed; not deleting");
                false
            }
        }
    }
}

/// Only an explicit yes counts.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
