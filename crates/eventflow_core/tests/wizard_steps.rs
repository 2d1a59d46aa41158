use eventflow_core::{
    FieldRule, FieldSpec, FieldValue, FieldValues, StepSchema, WizardConfigError, WizardError,
    WizardSession, WizardState,
};

/// Three-step venue inquiry wizard matching the site's contact flow.
fn venue_steps() -> Vec<StepSchema> {
    vec![
        StepSchema::new(vec![FieldSpec::new("event_type", vec![FieldRule::Required])]),
        StepSchema::new(vec![
            FieldSpec::new("event_date", vec![FieldRule::Required]),
            FieldSpec::new(
                "guest_count",
                vec![
                    FieldRule::Required,
                    FieldRule::NumberRange { min: 10.0, max: 500.0 },
                ],
            ),
            FieldSpec::new("budget", vec![FieldRule::Required]),
            FieldSpec::new("special_requirements", vec![]),
        ]),
        StepSchema::new(vec![
            FieldSpec::new("name", vec![FieldRule::Required, FieldRule::MinChars(2)]),
            FieldSpec::new("email", vec![FieldRule::Required, FieldRule::Email]),
            FieldSpec::new("phone", vec![FieldRule::Required, FieldRule::MinChars(10)]),
            FieldSpec::new("message", vec![FieldRule::Required, FieldRule::MinChars(10)]),
        ]),
    ]
}

fn step1_input() -> FieldValues {
    [("event_type".to_string(), FieldValue::from("wedding"))].into()
}

fn step2_input() -> FieldValues {
    [
        ("event_date".to_string(), FieldValue::from("2026-11-07")),
        ("guest_count".to_string(), FieldValue::from(120.0)),
        ("budget".to_string(), FieldValue::from("25-50k")),
    ]
    .into()
}

#[test]
fn session_needs_at_least_two_steps() {
    let single = vec![StepSchema::default()];
    let err = WizardSession::new(single).expect_err("one step is not a wizard");
    assert_eq!(err, WizardConfigError::TooFewSteps(1));

    assert!(WizardSession::new(venue_steps()).is_ok());
}

#[test]
fn session_starts_at_step_one_with_empty_values() {
    let session = WizardSession::new(venue_steps()).expect("session");
    assert_eq!(session.state(), WizardState::Step(1));
    assert_eq!(session.step_count(), 3);
    assert!(session.values().is_empty());
    assert!(session.errors().is_empty());
}

#[test]
fn invalid_advance_keeps_step_and_merges_nothing() {
    let mut session = WizardSession::new(venue_steps()).expect("session");

    let err = session
        .advance(FieldValues::new())
        .expect_err("empty step-1 input must fail");
    let WizardError::ValidationFailed(errors) = err else {
        panic!("expected validation failure");
    };
    assert!(errors.contains_key("event_type"));

    assert_eq!(session.state(), WizardState::Step(1));
    assert!(session.values().is_empty());
    assert_eq!(session.errors(), &errors, "error set retained for inline display");
}

#[test]
fn valid_advance_merges_values_and_moves_forward() {
    let mut session = WizardSession::new(venue_steps()).expect("session");

    session.advance(step1_input()).expect("valid step-1 input");
    assert_eq!(session.state(), WizardState::Step(2));
    assert_eq!(
        session.values().get("event_type").and_then(FieldValue::as_text),
        Some("wedding")
    );
    assert!(session.errors().is_empty());
}

#[test]
fn retreat_preserves_previously_entered_values() {
    let mut session = WizardSession::new(venue_steps()).expect("session");
    session.advance(step1_input()).expect("step 1");
    session.advance(step2_input()).expect("step 2");
    assert_eq!(session.state(), WizardState::Step(3));

    session.retreat().expect("back to step 2");
    assert_eq!(session.state(), WizardState::Step(2));
    assert_eq!(
        session.values().get("guest_count").and_then(FieldValue::as_number),
        Some(120.0),
        "accumulated values survive backward transitions"
    );

    session.retreat().expect("back to step 1");
    assert_eq!(session.state(), WizardState::Step(1));
    assert_eq!(
        session.values().get("event_type").and_then(FieldValue::as_text),
        Some("wedding")
    );

    // Re-advancing with the same previously-valid input restores position.
    session.advance(step1_input()).expect("step 1 again");
    session.advance(step2_input()).expect("step 2 again");
    assert_eq!(session.state(), WizardState::Step(3));
}

#[test]
fn transitions_are_bounded_to_adjacent_steps() {
    let mut session = WizardSession::new(venue_steps()).expect("session");

    let err = session.retreat().expect_err("cannot retreat from step 1");
    assert_eq!(err, WizardError::AtFirstStep);

    session.advance(step1_input()).expect("step 1");
    session.advance(step2_input()).expect("step 2");

    let err = session
        .advance(FieldValues::new())
        .expect_err("advance past the final step");
    assert_eq!(err, WizardError::AtFinalStep);
    assert_eq!(session.state(), WizardState::Step(3));
}

#[test]
fn failed_validation_reports_only_offending_fields() {
    let mut session = WizardSession::new(venue_steps()).expect("session");
    session.advance(step1_input()).expect("step 1");

    let mut partial = step2_input();
    partial.insert("guest_count".to_string(), FieldValue::from(4.0));

    let err = session.advance(partial).expect_err("guest count too small");
    let WizardError::ValidationFailed(errors) = err else {
        panic!("expected validation failure");
    };
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("guest_count"));
    assert!(
        !session.values().contains_key("event_date"),
        "a failed step merges none of its values"
    );
}

#[test]
fn reset_returns_to_initial_state() {
    let mut session = WizardSession::new(venue_steps()).expect("session");
    session.advance(step1_input()).expect("step 1");
    session.advance(step2_input()).expect("step 2");

    session.reset().expect("reset outside submission");
    assert_eq!(session.state(), WizardState::Step(1));
    assert!(session.values().is_empty());
    assert!(session.errors().is_empty());
}
