//! Wizard session state machine.
//!
//! # Responsibility
//! - Sequence a fixed, ordered set of form steps, gating forward progress
//!   on per-step validation.
//! - Preserve accumulated values across backward transitions and failed
//!   submissions.
//! - Run the submission handshake and surface its outcome through the
//!   notification mailbox.
//!
//! # Invariants
//! - The current step index stays within `[1, N]`; no transition jumps
//!   more than one step.
//! - Values merge into the accumulated map only after their step's schema
//!   passed; a failed `advance` merges nothing.
//! - `Submitting` is exclusive: every other transition is rejected while a
//!   submission is unresolved.
//! - Successful submission resets the session; failure restores `Step(N)`
//!   with values intact so the user retries without re-entering anything.

use crate::clock::Clock;
use crate::mailbox::NotificationMailbox;
use crate::model::field::{flatten_payload, FieldValues};
use crate::model::notification::Severity;
use crate::submit::{ContactSubmitter, SubmitError};
use crate::wizard::schema::{StepSchema, ValidationErrors};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Toast shown when the contact request was accepted.
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Thanks! Your request was sent. We'll be in touch soon.";
/// Toast shown when the contact request failed.
pub const SUBMIT_FAILURE_MESSAGE: &str =
    "There was an error sending your request. Please try again.";
/// Submission outcome toasts linger longer than the default duration.
pub const SUBMIT_NOTIFICATION_DURATION_MS: u64 = 5_000;

/// Position of one wizard session.
///
/// `Completed` is not a resting state: a successfully resolved submission
/// immediately resets the session to `Step(1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// Showing step `i`, 1-based.
    Step(usize),
    /// A submission is in flight; the session rejects every transition
    /// until it is resolved.
    Submitting,
}

/// Construction-time configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardConfigError {
    /// A wizard needs at least two steps; single-screen forms don't.
    TooFewSteps(usize),
}

impl Display for WizardConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewSteps(count) => {
                write!(f, "wizard needs at least 2 steps, got {count}")
            }
        }
    }
}

impl Error for WizardConfigError {}

/// Transition error for one wizard operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The step's schema rejected the submitted values. The same map is
    /// retained on the session for inline rendering.
    ValidationFailed(ValidationErrors),
    /// Rejected because a submission is unresolved.
    SubmissionInFlight,
    /// `advance` from the final step; use the submission handshake instead.
    AtFinalStep,
    /// `retreat` from the first step.
    AtFirstStep,
    /// Submission requested before reaching the final step.
    NotAtFinalStep(usize),
    /// `resolve_submit` without a matching `begin_submit`.
    NoSubmissionInFlight,
    /// The transport reported failure; recoverable from the final step.
    Submission(SubmitError),
}

impl Display for WizardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed(errors) => {
                write!(f, "step validation failed for {} field(s)", errors.len())
            }
            Self::SubmissionInFlight => write!(f, "a submission is already in flight"),
            Self::AtFinalStep => write!(f, "cannot advance past the final step"),
            Self::AtFirstStep => write!(f, "cannot retreat before the first step"),
            Self::NotAtFinalStep(step) => {
                write!(f, "submission is only valid from the final step, at step {step}")
            }
            Self::NoSubmissionInFlight => write!(f, "no submission in flight to resolve"),
            Self::Submission(err) => write!(f, "{err}"),
        }
    }
}

impl Error for WizardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Submission(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SubmitError> for WizardError {
    fn from(value: SubmitError) -> Self {
        Self::Submission(value)
    }
}

/// One in-progress multi-step form.
#[derive(Debug)]
pub struct WizardSession {
    steps: Vec<StepSchema>,
    state: WizardState,
    values: FieldValues,
    errors: ValidationErrors,
}

impl WizardSession {
    /// Creates a session at `Step(1)` with empty accumulated values.
    pub fn new(steps: Vec<StepSchema>) -> Result<Self, WizardConfigError> {
        if steps.len() < 2 {
            return Err(WizardConfigError::TooFewSteps(steps.len()));
        }
        Ok(Self {
            steps,
            state: WizardState::Step(1),
            values: FieldValues::new(),
            errors: ValidationErrors::new(),
        })
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Current 1-based step index. While submitting this is the final step,
    /// which is where the session lands if the submission fails.
    pub fn current_step(&self) -> usize {
        match self.state {
            WizardState::Step(step) => step,
            WizardState::Submitting => self.steps.len(),
        }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_submitting(&self) -> bool {
        self.state == WizardState::Submitting
    }

    /// Accumulated values from every step validated so far.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Error set from the most recent failed validation; empty after any
    /// successful transition.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validates `input` against the current step and moves forward.
    ///
    /// On failure the session stays put, merges nothing and retains the
    /// error set for inline display.
    pub fn advance(&mut self, input: FieldValues) -> Result<(), WizardError> {
        let step = self.require_step()?;
        if step >= self.steps.len() {
            return Err(WizardError::AtFinalStep);
        }

        self.validate_and_merge(step, input)?;
        self.state = WizardState::Step(step + 1);
        debug!(
            "event=wizard_advance module=wizard status=ok from={} to={}",
            step,
            step + 1
        );
        Ok(())
    }

    /// Moves one step back, unconditionally. Accumulated values stay put so
    /// re-visiting a later step shows previously entered values.
    pub fn retreat(&mut self) -> Result<(), WizardError> {
        let step = self.require_step()?;
        if step <= 1 {
            return Err(WizardError::AtFirstStep);
        }

        self.state = WizardState::Step(step - 1);
        self.errors.clear();
        debug!(
            "event=wizard_retreat module=wizard status=ok from={} to={}",
            step,
            step - 1
        );
        Ok(())
    }

    /// Validates the final step, merges its values and enters `Submitting`.
    ///
    /// Returns the flattened JSON payload of every accumulated value for
    /// the caller to send; the session stays `Submitting` until
    /// [`resolve_submit`](Self::resolve_submit) is called with the outcome.
    pub fn begin_submit(&mut self, input: FieldValues) -> Result<serde_json::Value, WizardError> {
        let step = self.require_step()?;
        if step < self.steps.len() {
            return Err(WizardError::NotAtFinalStep(step));
        }

        self.validate_and_merge(step, input)?;
        self.state = WizardState::Submitting;
        debug!("event=wizard_submit_started module=wizard step={step}");
        Ok(flatten_payload(&self.values))
    }

    /// Resolves an in-flight submission.
    ///
    /// Success queues a success notification and resets the session.
    /// Failure queues an error notification and restores the final step
    /// with accumulated values preserved for retry.
    pub fn resolve_submit<C: Clock>(
        &mut self,
        outcome: Result<(), SubmitError>,
        mailbox: &mut NotificationMailbox<C>,
    ) -> Result<(), WizardError> {
        if self.state != WizardState::Submitting {
            return Err(WizardError::NoSubmissionInFlight);
        }

        match outcome {
            Ok(()) => {
                info!("event=wizard_submit_resolved module=wizard status=ok");
                mailbox.publish_with_duration(
                    Severity::Success,
                    SUBMIT_SUCCESS_MESSAGE,
                    SUBMIT_NOTIFICATION_DURATION_MS,
                );
                self.state = WizardState::Step(1);
                self.values.clear();
                self.errors.clear();
                Ok(())
            }
            Err(err) => {
                info!(
                    "event=wizard_submit_resolved module=wizard status=error reason={err}"
                );
                mailbox.publish_with_duration(
                    Severity::Error,
                    SUBMIT_FAILURE_MESSAGE,
                    SUBMIT_NOTIFICATION_DURATION_MS,
                );
                self.state = WizardState::Step(self.steps.len());
                Err(WizardError::Submission(err))
            }
        }
    }

    /// Runs the full submission handshake against a blocking transport.
    pub fn submit<C: Clock>(
        &mut self,
        input: FieldValues,
        transport: &dyn ContactSubmitter,
        mailbox: &mut NotificationMailbox<C>,
    ) -> Result<(), WizardError> {
        let payload = self.begin_submit(input)?;
        let outcome = transport.submit(&payload);
        self.resolve_submit(outcome, mailbox)
    }

    /// Returns the session to its initial state, discarding accumulated
    /// values. Rejected while a submission is unresolved.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        self.require_step()?;
        self.state = WizardState::Step(1);
        self.values.clear();
        self.errors.clear();
        Ok(())
    }

    fn require_step(&self) -> Result<usize, WizardError> {
        match self.state {
            WizardState::Step(step) => Ok(step),
            WizardState::Submitting => Err(WizardError::SubmissionInFlight),
        }
    }

    fn validate_and_merge(&mut self, step: usize, input: FieldValues) -> Result<(), WizardError> {
        // 1-based step over 0-based schema list; `require_step` bounds it.
        let schema = &self.steps[step - 1];
        let errors = schema.validate(&input);
        if !errors.is_empty() {
            debug!(
                "event=wizard_validation module=wizard status=error step={} fields={}",
                step,
                errors.len()
            );
            self.errors = errors.clone();
            return Err(WizardError::ValidationFailed(errors));
        }

        self.values.extend(input);
        self.errors.clear();
        Ok(())
    }
}
