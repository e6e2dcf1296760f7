//! Driven port for gating destructive actions on explicit user consent.

use crate::domain::HeroId;

/// Asks the user to confirm a hero deletion.
#[cfg_attr(test, mockall::automock)]
pub trait DeleteConfirmation: Send + Sync {
    /// Return `true` only when the user explicitly agreed.
    fn confirm_delete(&self, id: HeroId) -> bool;
}

/// Confirmation that always agrees. Used when consent was given up front,
/// such as a `--yes` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreConfirmed;

impl DeleteConfirmation for PreConfirmed {
    fn confirm_delete(&self, _id: HeroId) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pre_confirmed_agrees_to_every_deletion() {
        assert!(PreConfirmed.confirm_delete(HeroId::new(1)));
        assert!(PreConfirmed.confirm_delete(HeroId::new(-1)));
    }
}
