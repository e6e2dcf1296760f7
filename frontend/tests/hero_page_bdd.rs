//! Behaviour tests for the hero management page against the in-memory
//! hero backend.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use frontend::domain::ports::{HeroGatewayError, ValidationMessages};
use frontend::domain::{
    DeleteOutcome, EditorPhase, Hero, HeroField, HeroForm, HeroId, HeroPage, HeroPageError,
    NoticeKind, SubmitOutcome, Superpower, SuperpowerId,
};
use frontend::test_support::{
    FixedClock, GatewayOperation, InMemoryHeroGateway, ScriptedConfirmation,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

type Page = HeroPage<InMemoryHeroGateway, ScriptedConfirmation>;

struct HeroWorld {
    runtime: Runtime,
    gateway: Arc<InMemoryHeroGateway>,
    accept_deletes: bool,
    confirmation: Option<Arc<ScriptedConfirmation>>,
    page: Option<Page>,
    submitted: Option<Result<SubmitOutcome, HeroPageError>>,
    deleted: Option<Result<DeleteOutcome, HeroPageError>>,
}

impl HeroWorld {
    fn page(&mut self) -> &mut Page {
        self.page.as_mut().expect("the hero page must be open")
    }

    fn submit(&mut self) {
        let Self {
            runtime,
            page,
            submitted,
            ..
        } = self;
        let page = page.as_mut().expect("the hero page must be open");
        *submitted = Some(runtime.block_on(page.submit()));
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn catalogue() -> Vec<Superpower> {
    vec![
        Superpower::new(SuperpowerId::new(1), "Strength"),
        Superpower::new(SuperpowerId::new(2), "Flight"),
        Superpower::new(SuperpowerId::new(3), "Heat vision"),
        Superpower::new(SuperpowerId::new(5), "Speed"),
    ]
}

fn stored_heroes() -> Vec<Hero> {
    vec![
        Hero {
            id: Some(HeroId::new(10)),
            name: "Bruce Wayne".to_owned(),
            hero_name: "Batman".to_owned(),
            birth_date: date(1939, 5, 27),
            height: 1.88,
            weight: 95.0,
            superpower_ids: vec![SuperpowerId::new(1)],
            superpowers: Some(vec![Superpower::new(SuperpowerId::new(1), "Strength")]),
        },
        Hero {
            id: Some(HeroId::new(11)),
            name: "Diana Prince".to_owned(),
            hero_name: "Wonder Woman".to_owned(),
            birth_date: date(1941, 10, 21),
            height: 1.83,
            weight: 75.0,
            superpower_ids: vec![SuperpowerId::new(1), SuperpowerId::new(2)],
            superpowers: Some(vec![
                Superpower::new(SuperpowerId::new(1), "Strength"),
                Superpower::new(SuperpowerId::new(2), "Flight"),
            ]),
        },
    ]
}

#[fixture]
fn world() -> Mutex<HeroWorld> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime builds");
    let gateway =
        Arc::new(InMemoryHeroGateway::with_superpowers(catalogue()).with_heroes(stored_heroes()));
    Mutex::new(HeroWorld {
        runtime,
        gateway,
        accept_deletes: true,
        confirmation: None,
        page: None,
        submitted: None,
        deleted: None,
    })
}

fn fill(page: &mut Page, values: [(HeroField, &str); 5]) {
    for (field, value) in values {
        page.set_field(field, value).expect("modal is open");
    }
}

fn field_named(name: &str) -> HeroField {
    HeroField::ALL
        .into_iter()
        .find(|field| field.as_str() == name)
        .unwrap_or_else(|| panic!("unknown field {name}"))
}

// -----------------------------------------------------------------------------
// Given steps
// -----------------------------------------------------------------------------

#[given("deletion prompts will be declined")]
fn deletion_prompts_will_be_declined(world: &Mutex<HeroWorld>) {
    world.lock().expect("world lock").accept_deletes = false;
}

#[given("the backend will reject the next create as a duplicate alias")]
fn backend_rejects_duplicate_alias(world: &Mutex<HeroWorld>) {
    let errors: ValidationMessages = [("heroName", vec!["must be unique"])].into_iter().collect();
    world.lock().expect("world lock").gateway.fail_next(
        GatewayOperation::CreateHero,
        HeroGatewayError::validation(errors),
    );
}

#[given("the backend will drop the next delete")]
fn backend_drops_next_delete(world: &Mutex<HeroWorld>) {
    world.lock().expect("world lock").gateway.fail_next(
        GatewayOperation::DeleteHero,
        HeroGatewayError::transport("connection reset"),
    );
}

#[given("the hero page is open")]
fn the_hero_page_is_open(world: &Mutex<HeroWorld>) {
    let mut world = world.lock().expect("world lock");
    let confirmation = Arc::new(if world.accept_deletes {
        ScriptedConfirmation::accepting()
    } else {
        ScriptedConfirmation::declining()
    });
    let mut page = HeroPage::new(
        Arc::clone(&world.gateway),
        Arc::clone(&confirmation),
        Arc::new(FixedClock::ymd(2024, 6, 15)),
    );
    world
        .runtime
        .block_on(page.load_session())
        .expect("session loads");
    world.confirmation = Some(confirmation);
    world.page = Some(page);
}

#[given("hero {id} is open for editing")]
fn hero_is_open_for_editing(world: &Mutex<HeroWorld>, id: i64) {
    let mut world = world.lock().expect("world lock");
    let hero = world
        .page()
        .heroes()
        .iter()
        .find(|hero| hero.id == Some(HeroId::new(id)))
        .cloned()
        .expect("hero is listed");
    world.page().open_edit(&hero).expect("persisted hero");
}

// -----------------------------------------------------------------------------
// When steps
// -----------------------------------------------------------------------------

#[when("the user submits a valid new hero with superpowers {first} and {second}")]
fn user_submits_valid_new_hero(world: &Mutex<HeroWorld>, first: i64, second: i64) {
    let mut world = world.lock().expect("world lock");
    let page = world.page();
    page.open_create().expect("idle page opens");
    fill(
        page,
        [
            (HeroField::Name, "Clark Kent"),
            (HeroField::HeroName, "Superman"),
            (HeroField::BirthDate, "1938-04-18"),
            (HeroField::Height, "1.91"),
            (HeroField::Weight, "95"),
        ],
    );
    page.toggle_superpower(SuperpowerId::new(first)).expect("open");
    page.toggle_superpower(SuperpowerId::new(second)).expect("open");
    world.submit();
}

#[when("the user submits a new hero named {name}")]
fn user_submits_new_hero_named(world: &Mutex<HeroWorld>, name: String) {
    let mut world = world.lock().expect("world lock");
    let page = world.page();
    page.open_create().expect("idle page opens");
    fill(
        page,
        [
            (HeroField::Name, name.as_str()),
            (HeroField::HeroName, "Atom"),
            (HeroField::BirthDate, "1961-10-01"),
            (HeroField::Height, "1.8"),
            (HeroField::Weight, "80"),
        ],
    );
    world.submit();
}

#[when("the user submits the open hero with weight {weight}")]
fn user_submits_open_hero_with_weight(world: &Mutex<HeroWorld>, weight: String) {
    let mut world = world.lock().expect("world lock");
    world
        .page()
        .set_field(HeroField::Weight, weight)
        .expect("modal is open");
    world.submit();
}

#[when("the user deletes hero {id}")]
fn user_deletes_hero(world: &Mutex<HeroWorld>, id: i64) {
    let mut world = world.lock().expect("world lock");
    let HeroWorld { runtime, page, .. } = &mut *world;
    let page = page.as_mut().expect("the hero page must be open");
    let outcome = runtime.block_on(page.delete(HeroId::new(id)));
    world.deleted = Some(outcome);
}

// -----------------------------------------------------------------------------
// Then steps
// -----------------------------------------------------------------------------

fn created_hero(world: &HeroWorld) -> &Hero {
    match world.submitted.as_ref().expect("a submission was made") {
        Ok(SubmitOutcome::Created(hero)) => hero,
        other => panic!("expected a created hero, got {other:?}"),
    }
}

#[then("the backend assigns the new hero an identifier")]
fn backend_assigns_identifier(world: &Mutex<HeroWorld>) {
    let world = world.lock().expect("world lock");
    assert!(created_hero(&world).id.is_some());
}

#[then("the refreshed list shows the new hero with superpowers {first} and {second}")]
fn refreshed_list_shows_new_hero(world: &Mutex<HeroWorld>, first: i64, second: i64) {
    let mut world = world.lock().expect("world lock");
    let id = created_hero(&world).id;
    assert_eq!(world.gateway.count(GatewayOperation::ListHeroes), 2);
    let listed = world
        .page()
        .heroes()
        .iter()
        .find(|hero| hero.id == id)
        .cloned()
        .expect("refreshed list contains the new hero");
    assert_eq!(listed.hero_name, "Superman");
    assert_eq!(
        listed.superpower_ids,
        [SuperpowerId::new(first), SuperpowerId::new(second)]
    );
}

#[then("the modal is closed")]
fn the_modal_is_closed(world: &Mutex<HeroWorld>) {
    let mut world = world.lock().expect("world lock");
    assert_eq!(world.page().phase(), EditorPhase::Idle);
}

#[then("the modal stays open")]
fn the_modal_stays_open(world: &Mutex<HeroWorld>) {
    let mut world = world.lock().expect("world lock");
    assert!(world.page().is_modal_open());
}

#[then("the {field} field shows {message}")]
fn the_field_shows(world: &Mutex<HeroWorld>, field: String, message: String) {
    let mut world = world.lock().expect("world lock");
    assert!(matches!(
        world.submitted,
        Some(Err(HeroPageError::InvalidForm { .. }))
    ));
    assert_eq!(
        world.page().visible_error(field_named(&field)),
        Some(message)
    );
}

#[then("no create request is sent")]
fn no_create_request_is_sent(world: &Mutex<HeroWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.gateway.count(GatewayOperation::CreateHero), 0);
}

#[then("no update request is sent")]
fn no_update_request_is_sent(world: &Mutex<HeroWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.gateway.count(GatewayOperation::UpdateHero), 0);
}

#[then("no delete request is sent")]
fn no_delete_request_is_sent(world: &Mutex<HeroWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(
        world.deleted.as_ref().map(|outcome| outcome.as_ref().ok()),
        Some(Some(&DeleteOutcome::Declined))
    );
    assert_eq!(world.gateway.count(GatewayOperation::DeleteHero), 0);
}

#[then("the user was asked to confirm deleting hero {id}")]
fn user_was_asked_to_confirm(world: &Mutex<HeroWorld>, id: i64) {
    let world = world.lock().expect("world lock");
    let confirmation = world.confirmation.as_ref().expect("page is open");
    assert_eq!(confirmation.prompts(), [HeroId::new(id)]);
    assert!(matches!(
        world.deleted,
        Some(Ok(DeleteOutcome::Deleted {
            closed_editor: true
        }))
    ));
}

#[then("hero {id} is no longer listed")]
fn hero_is_no_longer_listed(world: &Mutex<HeroWorld>, id: i64) {
    let mut world = world.lock().expect("world lock");
    assert!(
        world
            .page()
            .heroes()
            .iter()
            .all(|hero| hero.id != Some(HeroId::new(id)))
    );
}

#[then("{count} heroes are listed")]
fn heroes_are_listed(world: &Mutex<HeroWorld>, count: usize) {
    let mut world = world.lock().expect("world lock");
    assert_eq!(world.page().heroes().len(), count);
    assert_eq!(world.gateway.stored_heroes().len(), count);
}

#[then("the form is empty")]
fn the_form_is_empty(world: &Mutex<HeroWorld>) {
    let mut world = world.lock().expect("world lock");
    assert_eq!(world.page().form(), &HeroForm::empty());
}

#[then("a validation notice lists {message}")]
fn validation_notice_lists(world: &Mutex<HeroWorld>, message: String) {
    let mut world = world.lock().expect("world lock");
    assert!(matches!(
        world.submitted,
        Some(Err(HeroPageError::Gateway { .. }))
    ));
    let notice = world.page().notice().cloned().expect("notice is shown");
    assert_eq!(notice.kind(), NoticeKind::Validation);
    assert!(notice.text().contains(&format!("• {message}")), "{notice}");
}

#[then("the form keeps the entered values")]
fn the_form_keeps_entered_values(world: &Mutex<HeroWorld>) {
    let mut world = world.lock().expect("world lock");
    let page = world.page();
    assert_eq!(page.phase(), EditorPhase::Creating);
    assert_eq!(page.form().value(HeroField::Name), "Clark Kent");
    assert_eq!(page.form().value(HeroField::HeroName), "Superman");
}

#[then("the notice reads {text}")]
fn the_notice_reads(world: &Mutex<HeroWorld>, text: String) {
    let mut world = world.lock().expect("world lock");
    assert!(matches!(
        world.deleted,
        Some(Err(HeroPageError::Gateway { .. }))
    ));
    assert_eq!(
        world.page().notice().map(|notice| notice.text().to_owned()),
        Some(text)
    );
}

// -----------------------------------------------------------------------------
// Scenarios
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/hero_page.feature",
    name = "Creating a hero assigns an identifier and refreshes the list"
)]
fn creating_a_hero(world: Mutex<HeroWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/hero_page.feature",
    name = "A one-letter name blocks submission"
)]
fn one_letter_name(world: Mutex<HeroWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/hero_page.feature",
    name = "An overweight edit is blocked"
)]
fn overweight_edit(world: Mutex<HeroWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/hero_page.feature",
    name = "Deleting the hero being edited resets the form"
)]
fn deleting_the_edited_hero(world: Mutex<HeroWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/hero_page.feature",
    name = "A backend validation error keeps the modal open"
)]
fn backend_validation_error(world: Mutex<HeroWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/hero_page.feature",
    name = "Declining a deletion changes nothing"
)]
fn declined_deletion(world: Mutex<HeroWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/hero_page.feature",
    name = "An unreachable backend during deletion shows a generic notice"
)]
fn unreachable_backend_on_delete(world: Mutex<HeroWorld>) {
    drop(world);
}
