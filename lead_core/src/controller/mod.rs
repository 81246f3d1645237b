//! The form's state machine
//!
//! `Editing -> Submitting -> (Editing | Success)`, and `Success -> Editing` on
//! an explicit reset. The controller owns the live values and the view model;
//! the host forwards events and renders `view()`.

pub mod state;

#[cfg(test)]
mod tests;

pub use state::{FormState, FormView};

use crate::attribution::AttributionSnapshot;
use crate::config::FormConfig;
use crate::dispatch::{Delivery, Dispatch};
use crate::draft::DraftStore;
use crate::error::{LeadError, Result};
use crate::host::{DraftStorage, Navigator, PageContext};
use crate::models::{Field, FieldInput, FormValues, SubmissionPayload};
use crate::validation::{validate_form, ValidationResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug)]
pub enum SubmitStart {
    Ready(SubmissionPayload),
    Invalid(ValidationResult),
    Ignored(FormState),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Delivered(Delivery),
    Invalid(ValidationResult),
    Failed(LeadError),
    Ignored(FormState),
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmitOutcome::Delivered(_))
    }
}

pub struct LeadFormController<S: DraftStorage, P: PageContext> {
    form: FormConfig,
    values: FormValues,
    view: FormView,
    drafts: DraftStore<S>,
    page: P,
    navigator: Arc<dyn Navigator>,
    dispatcher: Arc<dyn Dispatch>,
}

impl<S: DraftStorage, P: PageContext> LeadFormController<S, P> {
    /// Page load: fill the attribution fields, then restore any saved draft.
    pub fn mount(
        form: FormConfig,
        drafts: DraftStore<S>,
        page: P,
        navigator: Arc<dyn Navigator>,
        dispatcher: Arc<dyn Dispatch>,
    ) -> Self {
        let view = FormView::editing(&form);
        let mut controller = Self {
            form,
            values: FormValues::new(),
            view,
            drafts,
            page,
            navigator,
            dispatcher,
        };

        controller.values.set_attribution(AttributionSnapshot::capture(&controller.page));

        match controller.drafts.load(&mut controller.values, &controller.form) {
            Ok(true) => info!(key = %controller.drafts.key(), "restored saved draft"),
            Ok(false) => {}
            Err(err) => debug!(error = %err, "draft could not be restored, starting empty"),
        }

        controller
    }

    pub fn state(&self) -> FormState {
        self.view.state
    }

    pub fn view(&self) -> &FormView {
        &self.view
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn drafts(&self) -> &DraftStore<S> {
        &self.drafts
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// An input event. Only honoured while editing; every accepted edit
    /// snapshots the whole form into the draft.
    pub fn on_input(&mut self, field: Field, input: impl Into<FieldInput>) -> bool {
        if self.view.state != FormState::Editing {
            debug!(field = %field, state = %self.view.state, "input ignored outside editing");
            return false;
        }

        if !self.values.apply_input(field, input.into(), &self.form) {
            debug!(field = %field, "input rejected by control");
            return false;
        }

        discard_draft_error("save", self.drafts.save(&self.values));
        true
    }

    pub fn validate(&self) -> ValidationResult {
        validate_form(&self.values, &self.form)
    }

    pub fn build_payload(&self, captured_at: DateTime<Utc>) -> SubmissionPayload {
        SubmissionPayload::new(self.values.clone(), self.page.href(), captured_at)
    }

    /// Validates and, when everything passes, moves to `Submitting` and hands
    /// back the payload to deliver.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.view.state != FormState::Editing {
            debug!(state = %self.view.state, "submit ignored");
            return SubmitStart::Ignored(self.view.state);
        }

        self.view.notice = None;
        let result = self.validate();
        self.view.errors = result
            .field_errors
            .iter()
            .map(|(field, error)| (*field, error.message.clone()))
            .collect();

        if !result.is_valid {
            info!(failed = ?result.failed_fields(), "submission blocked by validation");
            return SubmitStart::Invalid(result);
        }

        self.view.enter_submitting(&self.form);
        info!("submitting lead");
        SubmitStart::Ready(self.build_payload(Utc::now()))
    }

    /// Applies the dispatch outcome of the attempt started by `begin_submit`.
    pub fn finish_submit(&mut self, result: Result<Delivery>) -> SubmitOutcome {
        if self.view.state != FormState::Submitting {
            debug!(state = %self.view.state, "dispatch result ignored");
            return SubmitOutcome::Ignored(self.view.state);
        }

        match result {
            Ok(delivery) => {
                self.view.enter_success();
                discard_draft_error("clear", self.drafts.clear());
                info!(state = %self.view.state, "lead submitted");
                SubmitOutcome::Delivered(delivery)
            }
            Err(err) => {
                if err.is_dispatch_failure() {
                    warn!(error = %err, "lead dispatch failed, back to editing");
                } else {
                    error!(error = %err, "lead could not be prepared for dispatch, back to editing");
                }
                self.view
                    .return_to_editing(&self.form, Some(self.form.failure_notice.clone()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.begin_submit() {
            SubmitStart::Ready(payload) => payload,
            SubmitStart::Invalid(result) => return SubmitOutcome::Invalid(result),
            SubmitStart::Ignored(state) => return SubmitOutcome::Ignored(state),
        };

        let dispatcher = Arc::clone(&self.dispatcher);
        let result = dispatcher.dispatch(&payload).await;
        self.finish_submit(result)
    }

    /// The "new lead" action after a success.
    pub fn reset(&mut self) -> bool {
        if self.view.state != FormState::Success {
            debug!(state = %self.view.state, "reset ignored");
            return false;
        }

        self.view = FormView::editing(&self.form);
        self.values.clear();
        self.values.set_attribution(AttributionSnapshot::capture(&self.page));
        discard_draft_error("clear", self.drafts.clear());

        if let Err(err) = self.navigator.navigate(&self.form.anchor) {
            debug!(error = %err, anchor = %self.form.anchor, "could not jump to form anchor");
        }
        self.view.anchor = Some(self.form.anchor.clone());

        info!("form reset for a new lead");
        true
    }
}

/// Drafts are a best-effort cache: failures are logged and dropped on purpose.
fn discard_draft_error(operation: &'static str, result: Result<()>) {
    if let Err(err) = result {
        debug!(operation, error = %err, "draft operation failed, continuing without draft");
    }
}
