//! Domain primitives, validation, and the hero page controller.
//!
//! Purpose: hold every rule about heroes without knowing how they travel
//! over the network or how they are drawn. Adapters live in `inbound` and
//! `outbound`; the seams between them are the traits in [`ports`].
//!
//! Public surface:
//! - Hero, HeroPayload, Superpower and their identifiers.
//! - HeroForm and FormRules: draft state and per-field rules.
//! - SuperpowerSelection (via the SuperpowerPicker trait).
//! - Notice: text shown after a failed remote call.
//! - HeroPage: the controller driving the list and the create/edit modal.

pub mod hero;
pub mod hero_form;
pub mod hero_list;
pub mod hero_page;
pub mod notice;
pub mod ports;
pub mod superpower_selection;
pub mod validation;

pub use self::hero::{
    BIRTH_DATE_FORMAT, Hero, HeroId, HeroPayload, Superpower, SuperpowerId, format_birth_date,
    parse_birth_date, parse_form_date,
};
pub use self::hero_form::{FormValidation, HeroForm};
pub use self::hero_list::{HeroRow, UNKNOWN_SUPERPOWER, superpower_name};
pub use self::hero_page::{
    DeleteOutcome, EditorPhase, FormMode, HeroPage, HeroPageError, PageEvent, SubmitOutcome,
};
pub use self::notice::{HeroAction, Notice, NoticeKind, VALIDATION_HEADING};
pub use self::superpower_selection::{SuperpowerPicker, SuperpowerSelection};
pub use self::validation::{
    FieldKind, FieldRules, FieldViolation, FormRules, HEIGHT_RANGE, HeroField, NAME_MIN_LENGTH,
    WEIGHT_RANGE, parse_number, primary_message,
};
