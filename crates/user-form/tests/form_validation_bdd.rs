//! Behavioural tests for create-user form validation.
//!
//! These scenarios cover acceptance, normalisation, and the field-level
//! errors reported for each validation rule.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use user_form::{ErrorTree, FieldPath, FormInput, RawTechEntry, UserForm, validate};

/// Test world holding the raw input and the validation result.
#[derive(Default, ScenarioState)]
struct World {
    input: Slot<FormInput>,
    result: Slot<Result<UserForm, ErrorTree>>,
}

impl World {
    fn input(&self) -> FormInput {
        self.input.get().expect("form input should be set")
    }

    fn update_input(&self, update: impl FnOnce(&mut FormInput)) {
        let mut input = self.input();
        update(&mut input);
        self.input.set(input);
    }

    fn result(&self) -> Result<UserForm, ErrorTree> {
        self.result.get().expect("validation result should be set")
    }

    fn errors(&self) -> ErrorTree {
        self.result().expect_err("form should be rejected")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn complete_form(name: &str) -> FormInput {
    FormInput {
        name: name.to_owned(),
        email: "john@example.com".to_owned(),
        password: "secret-password".to_owned(),
        techs: vec![RawTechEntry::new("Rust", "3")],
    }
}

fn path(raw: &str) -> FieldPath {
    raw.parse().expect("test paths should parse")
}

// ============================================================================
// Given steps
// ============================================================================

#[given("a complete form")]
fn a_complete_form(world: &World) {
    world.input.set(complete_form("ada lovelace"));
}

#[given("a complete form with name \"{name}\"")]
fn a_complete_form_with_name(world: &World, name: String) {
    world.input.set(complete_form(&name));
}

#[given("an empty form")]
fn an_empty_form(world: &World) {
    world.input.set(FormInput::default());
}

#[given("the tech list is empty")]
fn the_tech_list_is_empty(world: &World) {
    world.update_input(|input| input.techs.clear());
}

#[given("the only tech entry has a blank title and years \"{years}\"")]
fn the_only_tech_entry_has_a_blank_title(world: &World, years: String) {
    world.update_input(|input| input.techs = vec![RawTechEntry::new("", years)]);
}

#[given("the only tech entry has title \"{title}\" and years \"{years}\"")]
fn the_only_tech_entry_has_title_and_years(world: &World, title: String, years: String) {
    world.update_input(|input| input.techs = vec![RawTechEntry::new(title, years)]);
}

#[given("the password is \"{password}\"")]
fn the_password_is(world: &World, password: String) {
    world.update_input(|input| input.password = password);
}

#[given("the email is \"{email}\"")]
fn the_email_is(world: &World, email: String) {
    world.update_input(|input| input.email = email);
}

// ============================================================================
// When steps
// ============================================================================

#[when("the form is validated")]
fn the_form_is_validated(world: &World) {
    let input = world.input();
    world.result.set(validate(&input));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the form is accepted")]
fn the_form_is_accepted(world: &World) {
    let result = world.result();
    assert!(result.is_ok(), "expected acceptance, got: {result:?}");
}

#[then("the form is rejected")]
fn the_form_is_rejected(world: &World) {
    assert!(world.result().is_err(), "expected rejection");
}

#[then("the normalised name is \"{name}\"")]
fn the_normalised_name_is(world: &World, name: String) {
    let form = world.result().expect("form should be accepted");
    assert_eq!(form.name(), name);
}

#[then("the error at \"{field}\" has code \"{code}\"")]
fn the_error_at_has_code(world: &World, field: String, code: String) {
    let errors = world.errors();
    let error = errors
        .get(&path(&field))
        .expect("an error should be recorded at the path");
    assert_eq!(error.code(), code);
}

#[then("the error at \"{field}\" has message \"{message}\"")]
fn the_error_at_has_message(world: &World, field: String, message: String) {
    let errors = world.errors();
    assert_eq!(errors.message_at(&path(&field)), Some(message.as_str()));
}

#[then("there is no error at \"{field}\"")]
fn there_is_no_error_at(world: &World, field: String) {
    let errors = world.errors();
    assert!(
        !errors.has_errors_under(&path(&field)),
        "unexpected error at {field}: {errors}"
    );
}

#[then("the error count is {count}")]
fn the_error_count_is(world: &World, count: usize) {
    let errors = world.errors();
    assert_eq!(errors.len(), count, "errors were: {errors}");
}

// ============================================================================
// Scenarios
// ============================================================================

#[scenario(path = "tests/features/form_validation.feature", index = 0)]
fn complete_form_is_accepted_and_normalised(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 1)]
fn empty_tech_list_fails_at_the_list(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 2)]
fn blank_title_fails_only_the_title(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 3)]
fn negative_years_fail_the_minimum(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 4)]
fn non_numeric_years_fail_coercion(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 5)]
fn five_character_password_is_too_short(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 6)]
fn six_character_password_is_accepted(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 7)]
fn email_format_is_not_checked(world: World) {
    drop(world);
}

#[scenario(path = "tests/features/form_validation.feature", index = 8)]
fn every_failing_field_is_reported(world: World) {
    drop(world);
}
