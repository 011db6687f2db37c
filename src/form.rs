use crate::chain::Chain;
use crate::rules;
use crate::rules::{FieldError, ValidationErrors};
use crate::types::{Field, MintForm, MintRequest, SubmissionResult};

/// Answer to a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(ValidationErrors),
    /// A submission is already in flight; nothing was sent.
    Busy,
    Completed(SubmissionResult),
}

/// Read-only copy of the form state, as a view would render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub chain: Chain,
    pub form: MintForm,
    pub errors: ValidationErrors,
    pub in_flight: bool,
    pub result: Option<SubmissionResult>,
}

/// View state of one mint form and the rules for moving between states.
///
/// A submission goes `begin_submit` (validate, mark in flight) then
/// `finish_submit` (store the result, back to idle). Between the two any
/// further `begin_submit` is refused with `SubmitOutcome::Busy`.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    form: MintForm,
    errors: ValidationErrors,
    in_flight: bool,
    result: Option<SubmissionResult>,
}

impl FormState {
    pub fn new(chain: Chain) -> Self {
        Self {
            form: MintForm::for_chain(chain),
            ..Default::default()
        }
    }

    pub fn chain(&self) -> Chain {
        self.form.chain()
    }

    pub fn form(&self) -> &MintForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    pub fn select_chain(&mut self, chain: Chain) {
        self.form = MintForm::for_chain(chain);
        self.errors = ValidationErrors::default();
        self.result = None;
    }

    /// Writes `value` into `field` and drops that field's error without
    /// re-validating. Returns false when the selected chain has no such field.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.form.field_mut(field) {
            Some(slot) => {
                *slot = value.into();
                self.errors.clear_field(field);
                true
            }
            None => {
                tracing::debug!(
                    chain = %self.chain(),
                    field = %field,
                    "Ignoring update to a field the chain does not use"
                );
                false
            }
        }
    }

    /// Recomputes every field error and keeps the result as the shown errors.
    pub fn validate(&mut self) -> ValidationErrors {
        self.errors = rules::validate(&self.form);
        self.errors.clone()
    }

    /// Validates and, if the form is submittable, marks a submission in
    /// flight and hands back the request to send.
    pub fn begin_submit(&mut self) -> Result<MintRequest, SubmitOutcome> {
        if self.in_flight {
            return Err(SubmitOutcome::Busy);
        }

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(SubmitOutcome::Invalid(errors));
        }

        let request = match build_request(&self.form) {
            Ok(request) => request,
            Err(errors) => {
                self.errors = errors.clone();
                return Err(SubmitOutcome::Invalid(errors));
            }
        };

        self.in_flight = true;
        self.result = None;
        Ok(request)
    }

    /// Records the outcome of the submission for `chain` and returns to idle.
    /// A result for a chain the user has since switched away from is not
    /// kept; the new chain's form starts without a result.
    pub fn finish_submit(&mut self, chain: Chain, result: SubmissionResult) {
        self.in_flight = false;

        if chain != self.chain() {
            tracing::info!(
                submitted = %chain,
                selected = %self.chain(),
                success = result.is_success(),
                "Dropping result for a chain that is no longer selected"
            );
            return;
        }

        if result.is_success() {
            self.form = MintForm::for_chain(chain);
            self.errors = ValidationErrors::default();
        }
        self.result = Some(result);
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            chain: self.chain(),
            form: self.form.clone(),
            errors: self.errors.clone(),
            in_flight: self.in_flight,
            result: self.result.clone(),
        }
    }
}

/// Wire request for an already validated form. A quantity that does not fit
/// the wire type is reported against `mintQuantity`.
fn build_request(form: &MintForm) -> Result<MintRequest, ValidationErrors> {
    form.to_request().ok_or_else(|| {
        ValidationErrors::from_rejection(Field::MintQuantity, FieldError::NotAWholeNumber)
    })
}
