//! Blocking user notices raised when a remote operation fails.

use std::fmt;

use super::ports::HeroGatewayError;

/// Remote operation that produced a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroAction {
    /// Loading the hero list.
    LoadHeroes,
    /// Loading the superpower catalogue.
    LoadSuperpowers,
    /// Fetching one hero for editing.
    LoadHero,
    /// Creating a hero.
    Create,
    /// Updating a hero.
    Update,
    /// Deleting a hero.
    Delete,
}

impl HeroAction {
    const fn failure_text(self) -> &'static str {
        match self {
            Self::LoadHeroes => "Failed to load heroes. See logs for details.",
            Self::LoadSuperpowers => "Failed to load superpowers. See logs for details.",
            Self::LoadHero => "Failed to load hero. See logs for details.",
            Self::Create => "Failed to create hero. See logs for details.",
            Self::Update => "Failed to update hero. See logs for details.",
            Self::Delete => "Failed to delete hero. See logs for details.",
        }
    }
}

impl fmt::Display for HeroAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadHeroes => "load heroes",
            Self::LoadSuperpowers => "load superpowers",
            Self::LoadHero => "load hero",
            Self::Create => "create hero",
            Self::Update => "update hero",
            Self::Delete => "delete hero",
        })
    }
}

/// Category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The backend rejected input with field-keyed messages.
    Validation,
    /// Any other failure.
    Failure,
}

/// Text shown to the user after a failed remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    text: String,
}

/// Heading line of a validation notice.
pub const VALIDATION_HEADING: &str = "Validation failed:";

impl Notice {
    /// Build the notice for a failed `action`.
    ///
    /// Validation failures list every message as a `• ` bullet, in backend
    /// order; anything else gets the action's generic message.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ports::{HeroGatewayError, ValidationMessages};
    /// use frontend::domain::{HeroAction, Notice};
    ///
    /// let errors: ValidationMessages = [("heroName", vec!["must be unique"])].into_iter().collect();
    /// let error = HeroGatewayError::validation(errors);
    /// let notice = Notice::for_failure(HeroAction::Create, &error);
    /// assert_eq!(notice.text(), "Validation failed:\n• must be unique\n");
    /// ```
    pub fn for_failure(action: HeroAction, error: &HeroGatewayError) -> Self {
        match error.validation_messages() {
            Some(errors) if !errors.is_empty() => {
                let mut text = format!("{VALIDATION_HEADING}\n");
                for message in errors.messages() {
                    text.push_str("• ");
                    text.push_str(message);
                    text.push('\n');
                }
                Self {
                    kind: NoticeKind::Validation,
                    text,
                }
            }
            _ => Self {
                kind: NoticeKind::Failure,
                text: action.failure_text().to_owned(),
            },
        }
    }

    /// Notice category.
    pub const fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Full notice text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ValidationMessages;
    use rstest::rstest;

    #[rstest]
    fn validation_notice_lists_every_message_across_fields() {
        let errors: ValidationMessages = [
            ("name", vec!["too common", "reserved"]),
            ("weight", vec!["implausible"]),
        ]
        .into_iter()
        .collect();
        let notice = Notice::for_failure(HeroAction::Update, &HeroGatewayError::validation(errors));
        assert_eq!(notice.kind(), NoticeKind::Validation);
        assert_eq!(
            notice.text(),
            "Validation failed:\n• too common\n• reserved\n• implausible\n"
        );
    }

    #[rstest]
    #[case(HeroAction::Create, "Failed to create hero. See logs for details.")]
    #[case(HeroAction::Update, "Failed to update hero. See logs for details.")]
    #[case(HeroAction::Delete, "Failed to delete hero. See logs for details.")]
    fn other_failures_use_generic_text(#[case] action: HeroAction, #[case] expected: &str) {
        let notice = Notice::for_failure(action, &HeroGatewayError::transport("refused"));
        assert_eq!(notice.kind(), NoticeKind::Failure);
        assert_eq!(notice.text(), expected);
    }

    #[rstest]
    fn empty_validation_map_falls_back_to_generic_text() {
        let error = HeroGatewayError::validation(ValidationMessages::default());
        let notice = Notice::for_failure(HeroAction::Create, &error);
        assert_eq!(notice.kind(), NoticeKind::Failure);
    }
}
