//! Hero management page controller.
//!
//! Owns the hero list, the superpower catalogue, and the create/edit modal
//! workflow. All mutation happens through `&mut self`, so at most one remote
//! call is in flight per controller. Views observe changes through
//! [`HeroPage::subscribe`] and read state through the accessors.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use super::hero::{Hero, HeroId, Superpower, SuperpowerId};
use super::hero_form::HeroForm;
use super::hero_list::{HeroRow, superpower_name};
use super::notice::{HeroAction, Notice};
use super::ports::{DeleteConfirmation, HeroGateway, HeroGatewayError};
use super::superpower_selection::{SuperpowerPicker, SuperpowerSelection};
use super::validation::{FormRules, HeroField};

const EVENT_CAPACITY: usize = 64;

/// Whether the open form creates or updates a hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// New hero.
    Create,
    /// Existing hero.
    Edit {
        /// Hero being edited.
        hero_id: HeroId,
    },
}

/// Modal workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// Modal closed, no draft.
    Idle,
    /// Modal open with a blank draft.
    Creating,
    /// Modal open with a draft loaded from a persistent hero.
    Editing {
        /// Hero being edited.
        hero_id: HeroId,
    },
    /// Draft validated; create or update call in flight.
    Submitting {
        /// Operation being performed.
        mode: FormMode,
    },
}

impl EditorPhase {
    const fn for_mode(mode: FormMode) -> Self {
        match mode {
            FormMode::Create => Self::Creating,
            FormMode::Edit { hero_id } => Self::Editing { hero_id },
        }
    }

    /// Whether the modal is visible.
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Change notification published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The hero list was replaced.
    HeroesRefreshed {
        /// Number of heroes now listed.
        count: usize,
    },
    /// The superpower catalogue was replaced.
    SuperpowersLoaded {
        /// Number of catalogue entries.
        count: usize,
    },
    /// The modal workflow moved to a new phase.
    PhaseChanged(EditorPhase),
    /// A blocking notice must be shown.
    Notice(Notice),
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A hero was created; carries the backend's copy with its identifier.
    Created(Hero),
    /// A hero was replaced.
    Updated(Hero),
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The hero was deleted.
    Deleted {
        /// Whether the deleted hero was open in the editor, which was closed.
        closed_editor: bool,
    },
    /// The user declined; nothing happened.
    Declined,
}

/// Errors returned by page operations.
#[derive(Debug, thiserror::Error)]
pub enum HeroPageError {
    /// Create was requested while the modal is already open.
    #[error("the hero form is already open")]
    ModalAlreadyOpen,
    /// A form operation was requested while the modal is closed.
    #[error("no hero form is open")]
    ModalClosed,
    /// Edit was requested for a hero without an identifier.
    #[error("hero has no identifier and cannot be edited")]
    NotPersisted,
    /// Client-side validation blocked the submission.
    #[error("hero form has invalid fields: {fields:?}")]
    InvalidForm {
        /// Fields that failed validation.
        fields: Vec<HeroField>,
    },
    /// The hero API call failed; `notice` is what the user was shown.
    #[error("failed to {action}: {source}")]
    Gateway {
        /// Operation that failed.
        action: HeroAction,
        /// Notice surfaced for the failure.
        notice: Notice,
        /// Underlying gateway error.
        #[source]
        source: HeroGatewayError,
    },
}

/// Controller for the hero management page.
pub struct HeroPage<G, C> {
    gateway: Arc<G>,
    confirmation: Arc<C>,
    clock: Arc<dyn Clock>,
    rules: FormRules,
    heroes: Vec<Hero>,
    superpowers: Vec<Superpower>,
    phase: EditorPhase,
    form: HeroForm,
    selection: SuperpowerSelection,
    notice: Option<Notice>,
    events: broadcast::Sender<PageEvent>,
}

impl<G, C> HeroPage<G, C> {
    /// Create an idle page with empty list and catalogue.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use frontend::domain::HeroPage;
    /// # use frontend::domain::ports::{FixtureHeroGateway, PreConfirmed};
    /// # use mockable::DefaultClock;
    /// # async fn example() -> Result<(), frontend::domain::HeroPageError> {
    /// let mut page = HeroPage::new(
    ///     Arc::new(FixtureHeroGateway),
    ///     Arc::new(PreConfirmed),
    ///     Arc::new(DefaultClock),
    /// );
    /// page.load_session().await?;
    /// assert!(page.heroes().is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(gateway: Arc<G>, confirmation: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            gateway,
            confirmation,
            clock,
            rules: FormRules::default(),
            heroes: Vec::new(),
            superpowers: Vec::new(),
            phase: EditorPhase::Idle,
            form: HeroForm::empty(),
            selection: SuperpowerSelection::new(),
            notice: None,
            events,
        }
    }

    /// Replace the form rule table.
    #[must_use]
    pub fn with_rules(mut self, rules: FormRules) -> Self {
        self.rules = rules;
        self
    }

    /// Receive change notifications from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<PageEvent> {
        self.events.subscribe()
    }

    /// Heroes as last loaded.
    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    /// Superpower catalogue as loaded for this session.
    pub fn superpowers(&self) -> &[Superpower] {
        &self.superpowers
    }

    /// Display rows for the hero list.
    pub fn hero_rows(&self) -> Vec<HeroRow> {
        self.heroes
            .iter()
            .map(|hero| HeroRow::project(hero, &self.superpowers))
            .collect()
    }

    /// Catalogue name for `id`, or the fallback label.
    pub fn superpower_name(&self, id: SuperpowerId) -> &str {
        superpower_name(&self.superpowers, id)
    }

    /// Current modal phase.
    pub const fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Whether the modal is visible.
    pub const fn is_modal_open(&self) -> bool {
        self.phase.is_open()
    }

    /// The current draft.
    pub const fn form(&self) -> &HeroForm {
        &self.form
    }

    /// Selected superpowers, ascending.
    pub fn selected_superpowers(&self) -> Vec<SuperpowerId> {
        self.selection.selected()
    }

    /// Whether `id` is selected in the draft.
    pub fn is_superpower_selected(&self, id: SuperpowerId) -> bool {
        self.selection.contains(id)
    }

    /// Most recent notice, if any.
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Dismiss and return the current notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Whether the error for `field` should be displayed.
    pub fn should_show_error(&self, field: HeroField) -> bool {
        self.form
            .should_show_error(field, &self.rules, self.today())
    }

    /// Message to display for `field` under the error-display policy.
    pub fn visible_error(&self, field: HeroField) -> Option<String> {
        if !self.should_show_error(field) {
            return None;
        }
        self.form.error_message(field, &self.rules, self.today())
    }

    /// Start a new hero. Only allowed while the modal is closed.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::ModalAlreadyOpen`] when a form is open.
    pub fn open_create(&mut self) -> Result<(), HeroPageError> {
        if self.phase.is_open() {
            return Err(HeroPageError::ModalAlreadyOpen);
        }
        self.form = HeroForm::empty();
        self.selection.clear();
        self.set_phase(EditorPhase::Creating);
        Ok(())
    }

    /// Load `hero` into the draft and open the modal.
    ///
    /// The selection is seeded from the hero's expanded superpowers.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::NotPersisted`] when `hero` has no identifier.
    pub fn open_edit(&mut self, hero: &Hero) -> Result<(), HeroPageError> {
        let hero_id = hero.id.ok_or(HeroPageError::NotPersisted)?;
        self.form = HeroForm::from_hero(hero);
        self.selection = hero.expanded_superpower_ids().into_iter().collect();
        self.set_phase(EditorPhase::Editing { hero_id });
        Ok(())
    }

    /// Update one draft field and mark it touched.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::ModalClosed`] when no form is open.
    pub fn set_field(
        &mut self,
        field: HeroField,
        value: impl Into<String>,
    ) -> Result<(), HeroPageError> {
        self.ensure_open()?;
        self.form.set(field, value);
        Ok(())
    }

    /// Mark a field touched, as when it loses focus.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::ModalClosed`] when no form is open.
    pub fn touch_field(&mut self, field: HeroField) -> Result<(), HeroPageError> {
        self.ensure_open()?;
        self.form.touch(field);
        Ok(())
    }

    /// Add or remove one superpower from the draft selection.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::ModalClosed`] when no form is open.
    pub fn toggle_superpower(&mut self, id: SuperpowerId) -> Result<(), HeroPageError> {
        self.ensure_open()?;
        self.selection.toggle(id);
        Ok(())
    }

    /// Remove one superpower from the draft selection.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::ModalClosed`] when no form is open.
    pub fn remove_superpower(&mut self, id: SuperpowerId) -> Result<(), HeroPageError> {
        self.ensure_open()?;
        self.selection.remove(id);
        Ok(())
    }

    /// Clear the draft selection.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::ModalClosed`] when no form is open.
    pub fn clear_superpowers(&mut self) -> Result<(), HeroPageError> {
        self.ensure_open()?;
        self.selection.clear();
        Ok(())
    }

    /// Discard the draft and close the modal.
    pub fn cancel(&mut self) {
        self.reset_editor();
    }

    fn ensure_open(&self) -> Result<(), HeroPageError> {
        if self.phase.is_open() {
            Ok(())
        } else {
            Err(HeroPageError::ModalClosed)
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.local().date_naive()
    }

    fn set_phase(&mut self, phase: EditorPhase) {
        self.phase = phase;
        self.publish(PageEvent::PhaseChanged(phase));
    }

    fn reset_editor(&mut self) {
        self.form = HeroForm::empty();
        self.selection.clear();
        self.set_phase(EditorPhase::Idle);
    }

    fn publish(&self, event: PageEvent) {
        // No subscribers is fine.
        self.events.send(event).ok();
    }

    fn fail(&mut self, action: HeroAction, source: HeroGatewayError) -> HeroPageError {
        error!(%action, error = %source, "hero api call failed");
        let notice = Notice::for_failure(action, &source);
        self.notice = Some(notice.clone());
        self.publish(PageEvent::Notice(notice.clone()));
        HeroPageError::Gateway {
            action,
            notice,
            source,
        }
    }
}

impl<G, C> HeroPage<G, C>
where
    G: HeroGateway,
    C: DeleteConfirmation,
{
    /// Load the superpower catalogue and the hero list.
    ///
    /// Both loads are attempted; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::Gateway`] when either load fails.
    pub async fn load_session(&mut self) -> Result<(), HeroPageError> {
        let catalogue = self.load_superpowers().await;
        let heroes = self.refresh_heroes().await;
        catalogue.and(heroes)
    }

    /// Replace the superpower catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::Gateway`] when the catalogue cannot be loaded;
    /// the previous catalogue is kept.
    pub async fn load_superpowers(&mut self) -> Result<(), HeroPageError> {
        match self.gateway.list_superpowers().await {
            Ok(superpowers) => {
                self.superpowers = superpowers;
                self.publish(PageEvent::SuperpowersLoaded {
                    count: self.superpowers.len(),
                });
                Ok(())
            }
            Err(source) => Err(self.fail(HeroAction::LoadSuperpowers, source)),
        }
    }

    /// Replace the hero list from the backend.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::Gateway`] when the list cannot be loaded; the
    /// previous list is kept.
    pub async fn refresh_heroes(&mut self) -> Result<(), HeroPageError> {
        match self.gateway.list_heroes().await {
            Ok(heroes) => {
                self.heroes = heroes;
                self.publish(PageEvent::HeroesRefreshed {
                    count: self.heroes.len(),
                });
                Ok(())
            }
            Err(source) => Err(self.fail(HeroAction::LoadHeroes, source)),
        }
    }

    /// Fetch a hero by identifier and open it for editing.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::Gateway`] when the hero cannot be fetched.
    pub async fn open_edit_by_id(&mut self, id: HeroId) -> Result<(), HeroPageError> {
        let hero = match self.gateway.get_hero(id).await {
            Ok(hero) => hero,
            Err(source) => return Err(self.fail(HeroAction::LoadHero, source)),
        };
        // The backend may omit the id on single-hero responses.
        let hero = Hero {
            id: hero.id.or(Some(id)),
            ..hero
        };
        self.open_edit(&hero)
    }

    /// Validate the draft and send it.
    ///
    /// The form is marked submitted first, so every error becomes visible.
    /// On success the list is refreshed and the modal closes. On failure the
    /// draft stays intact and the modal stays open.
    ///
    /// # Errors
    ///
    /// - [`HeroPageError::ModalClosed`] when no form is open.
    /// - [`HeroPageError::InvalidForm`] when client-side validation fails; no
    ///   request is sent.
    /// - [`HeroPageError::Gateway`] when the backend call fails.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, HeroPageError> {
        let mode = match self.phase {
            EditorPhase::Creating => FormMode::Create,
            EditorPhase::Editing { hero_id } => FormMode::Edit { hero_id },
            EditorPhase::Idle | EditorPhase::Submitting { .. } => {
                return Err(HeroPageError::ModalClosed);
            }
        };

        self.form.mark_submitted();
        let today = self.today();
        let payload = match self.form.to_payload(&self.selection, &self.rules, today) {
            Ok(payload) => payload,
            Err(validation) => {
                self.form.touch_all();
                let fields = validation.invalid_fields();
                warn!(?fields, "hero submission blocked by validation");
                return Err(HeroPageError::InvalidForm { fields });
            }
        };

        self.set_phase(EditorPhase::Submitting { mode });
        let (action, result) = match mode {
            FormMode::Create => (
                HeroAction::Create,
                self.gateway.create_hero(&payload).await,
            ),
            FormMode::Edit { hero_id } => (
                HeroAction::Update,
                self.gateway.update_hero(hero_id, &payload).await,
            ),
        };

        match result {
            Ok(hero) => {
                info!(%action, hero_id = ?hero.id, "hero saved");
                self.refresh_after_mutation().await;
                self.reset_editor();
                Ok(match mode {
                    FormMode::Create => SubmitOutcome::Created(hero),
                    FormMode::Edit { .. } => SubmitOutcome::Updated(hero),
                })
            }
            Err(source) => {
                self.set_phase(EditorPhase::for_mode(mode));
                Err(self.fail(action, source))
            }
        }
    }

    /// Delete a hero after explicit confirmation.
    ///
    /// When the hero is open in the editor, the editor is reset.
    ///
    /// # Errors
    ///
    /// Returns [`HeroPageError::Gateway`] when the delete call fails; state is
    /// left unchanged.
    pub async fn delete(&mut self, id: HeroId) -> Result<DeleteOutcome, HeroPageError> {
        if !self.confirmation.confirm_delete(id) {
            info!(%id, "hero deletion declined");
            return Ok(DeleteOutcome::Declined);
        }

        if let Err(source) = self.gateway.delete_hero(id).await {
            return Err(self.fail(HeroAction::Delete, source));
        }
        info!(%id, "hero deleted");

        self.heroes.retain(|hero| hero.id != Some(id));
        self.refresh_after_mutation().await;

        let closed_editor = self.editing_hero_id() == Some(id);
        if closed_editor {
            self.reset_editor();
        }
        Ok(DeleteOutcome::Deleted { closed_editor })
    }

    fn editing_hero_id(&self) -> Option<HeroId> {
        match self.phase {
            EditorPhase::Editing { hero_id }
            | EditorPhase::Submitting {
                mode: FormMode::Edit { hero_id },
            } => Some(hero_id),
            _ => None,
        }
    }

    async fn refresh_after_mutation(&mut self) {
        if let Err(err) = self.refresh_heroes().await {
            warn!(error = %err, "hero list refresh failed after a successful change");
        }
    }
}

#[cfg(test)]
#[path = "hero_page_tests.rs"]
mod tests;
